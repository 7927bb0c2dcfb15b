use url::Url;

/// Connection settings for the CMS GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct CmsConfig {
	/// Base GraphQL endpoint, POSTed to for every query.
	pub graphql_url: Url,
	/// Public delivery key. Appended as the `auth` query parameter in key
	/// mode; unused in token mode.
	pub app_key: Option<String>,
}

impl CmsConfig {
	pub fn new(graphql_url: Url) -> Self {
		Self {
			graphql_url,
			app_key: None,
		}
	}

	pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
		self.app_key = Some(app_key.into());
		self
	}
}

/// How a single CMS request authenticates.
///
/// The two modes are mutually exclusive per request: key mode appends the
/// delivery key as a query parameter and sees published content only, token
/// mode sends the editor-issued bearer token and sees the draft it pins.
/// The upstream API rejects requests that mix both, so the transport never
/// combines them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
	/// Published content via the `auth` query parameter.
	AppKey,
	/// Draft content via an `Authorization: Bearer` header.
	PreviewToken(String),
}

impl AuthMode {
	/// Token mode when the caller supplied a non-empty token, key mode
	/// otherwise.
	pub fn from_preview_token(token: Option<&str>) -> Self {
		match token {
			Some(token) if !token.trim().is_empty() => {
				AuthMode::PreviewToken(token.trim().to_string())
			}
			_ => AuthMode::AppKey,
		}
	}

	pub fn is_preview(&self) -> bool {
		matches!(self, AuthMode::PreviewToken(_))
	}
}
