use thiserror::Error;

/// Errors produced while rendering pages.
#[derive(Debug, Error)]
pub enum PagesError {
	#[error("template {template} failed to render")]
	Render {
		template: String,
		#[source]
		source: tera::Error,
	},
	#[error("template context could not be built")]
	Context(#[from] tera::Error),
	#[error("view model could not be serialized")]
	Serialize(#[from] serde_json::Error),
}

pub type PagesResult<T> = Result<T, PagesError>;
