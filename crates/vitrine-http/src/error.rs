use hyper::StatusCode;
use thiserror::Error;

/// Errors raised by the HTTP primitives.
#[derive(Debug, Error)]
pub enum HttpError {
	/// The inbound request was malformed (bad URI, unparseable body).
	#[error("Invalid request: {0}")]
	InvalidRequest(String),

	/// Serializing a response body failed.
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// A handler failed in a way it could not express as a response.
	#[error("Handler error: {0}")]
	Handler(String),
}

impl HttpError {
	/// HTTP status this error maps to when it escapes to the server loop.
	pub fn status_code(&self) -> StatusCode {
		match self {
			HttpError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
			HttpError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
			HttpError::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

/// Result type alias for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;
