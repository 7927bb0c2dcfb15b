use serde_json::Value;
use thiserror::Error;

/// Errors raised while fetching or decoding CMS content.
#[derive(Debug, Error)]
pub enum CmsError {
	/// The delivery key is not configured, so key-mode requests cannot be
	/// built. Fatal for the request, never retried.
	#[error("CMS app key is not configured")]
	MissingApiKey,

	/// The request never produced a usable HTTP response (connect failure,
	/// timeout, unreadable body).
	#[error("CMS request failed: {0}")]
	Transport(String),

	/// The upstream answered with a non-success HTTP status. The response
	/// body is kept (parsed as JSON when possible, raw text otherwise) and
	/// statuses with a known cause carry a human-readable hint.
	#[error("CMS returned HTTP {status}{}", .hint.as_deref().map(|h| format!(" ({h})")).unwrap_or_default())]
	UpstreamStatus {
		status: u16,
		body: Value,
		hint: Option<String>,
	},

	/// HTTP 2xx but the GraphQL layer reported failures. The errors array
	/// is carried verbatim for the response envelope's `details`.
	#[error("GraphQL errors")]
	GraphqlErrors(Value),

	/// The response was well-formed but held no matching item.
	#[error("{0} not found")]
	NotFound(String),

	/// The response body did not match the shape the query guarantees.
	#[error("Unexpected CMS response: {0}")]
	InvalidResponse(String),
}

impl CmsError {
	/// HTTP status an API route answers with for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			CmsError::MissingApiKey => 500,
			CmsError::Transport(_) => 500,
			CmsError::UpstreamStatus { .. } => 500,
			CmsError::GraphqlErrors(_) => 400,
			CmsError::NotFound(_) => 404,
			CmsError::InvalidResponse(_) => 500,
		}
	}

	/// Structured payload for the envelope's `details` field, if any.
	pub fn details(&self) -> Option<Value> {
		match self {
			CmsError::GraphqlErrors(errors) => Some(errors.clone()),
			CmsError::UpstreamStatus { body, .. } if !body.is_null() => Some(body.clone()),
			_ => None,
		}
	}

	/// Hint used for upstream statuses with a known cause, currently only
	/// the short-lived preview token.
	pub fn token_expiry_hint() -> String {
		"preview token may be expired (5 minute TTL)".to_string()
	}
}

/// Result type alias for CMS operations.
pub type CmsResult<T> = Result<T, CmsError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_not_found_message() {
		let error = CmsError::NotFound("Page".to_string());
		assert_eq!(error.to_string(), "Page not found");
	}

	#[rstest]
	fn test_upstream_status_without_hint() {
		let error = CmsError::UpstreamStatus {
			status: 502,
			body: json!({"reason": "bad gateway"}),
			hint: None,
		};
		assert_eq!(error.to_string(), "CMS returned HTTP 502");
		assert_eq!(error.details(), Some(json!({"reason": "bad gateway"})));
	}

	#[rstest]
	fn test_upstream_status_with_expiry_hint() {
		let error = CmsError::UpstreamStatus {
			status: 401,
			body: Value::Null,
			hint: Some(CmsError::token_expiry_hint()),
		};
		assert_eq!(
			error.to_string(),
			"CMS returned HTTP 401 (preview token may be expired (5 minute TTL))"
		);
		assert_eq!(error.details(), None);
	}

	#[rstest]
	fn test_graphql_errors_carry_details() {
		let errors = json!([{"message": "Cannot query field"}]);
		let error = CmsError::GraphqlErrors(errors.clone());

		assert_eq!(error.to_string(), "GraphQL errors");
		assert_eq!(error.details(), Some(errors));
	}

	#[rstest]
	#[case(CmsError::MissingApiKey, 500)]
	#[case(CmsError::Transport("refused".into()), 500)]
	#[case(CmsError::UpstreamStatus { status: 503, body: Value::Null, hint: None }, 500)]
	#[case(CmsError::GraphqlErrors(json!([])), 400)]
	#[case(CmsError::NotFound("Block".into()), 404)]
	#[case(CmsError::InvalidResponse("items was an object".into()), 500)]
	fn test_status_code_taxonomy(#[case] error: CmsError, #[case] expected: u16) {
		assert_eq!(error.status_code(), expected);
	}
}
