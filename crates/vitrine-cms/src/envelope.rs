use serde::Serialize;
use serde_json::Value;

use crate::error::CmsError;

/// Uniform JSON envelope every API route answers with.
///
/// `{success, data?, error?, details?}` -- `data` only on success, `error`
/// (and `details` when the failure carries a payload) only on failure.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Value>,
}

impl ApiEnvelope {
	pub fn success(data: Value) -> Self {
		Self {
			success: true,
			data: Some(data),
			error: None,
			details: None,
		}
	}

	pub fn failure(error: impl Into<String>) -> Self {
		Self {
			success: false,
			data: None,
			error: Some(error.into()),
			details: None,
		}
	}

	pub fn with_details(mut self, details: Value) -> Self {
		self.details = Some(details);
		self
	}
}

impl From<&CmsError> for ApiEnvelope {
	fn from(error: &CmsError) -> Self {
		let mut envelope = ApiEnvelope::failure(error.to_string());
		envelope.details = error.details();
		envelope
	}
}

/// Envelope variant for the page-by-path route, which additionally echoes
/// the normalized lookup path and the upstream item count.
#[derive(Debug, Clone, Serialize)]
pub struct PageEnvelope {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	pub path: String,
	pub count: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Value>,
}

impl PageEnvelope {
	pub fn success(data: Value, path: impl Into<String>, count: usize) -> Self {
		Self {
			success: true,
			data: Some(data),
			path: path.into(),
			count,
			error: None,
			details: None,
		}
	}

	pub fn failure(error: &CmsError, path: impl Into<String>) -> Self {
		Self {
			success: false,
			data: None,
			path: path.into(),
			count: 0,
			error: Some(error.to_string()),
			details: error.details(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_json_diff::assert_json_eq;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_success_envelope_omits_error_fields() {
		let envelope = ApiEnvelope::success(json!({"Heading": "Hi"}));

		assert_json_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({"success": true, "data": {"Heading": "Hi"}})
		);
	}

	#[rstest]
	fn test_failure_envelope_omits_data() {
		let envelope = ApiEnvelope::failure("Menu not found");

		assert_json_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({"success": false, "error": "Menu not found"})
		);
	}

	#[rstest]
	fn test_graphql_errors_surface_verbatim_in_details() {
		let error = CmsError::GraphqlErrors(json!([{"message": "x"}]));

		let envelope = ApiEnvelope::from(&error);

		assert_json_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({
				"success": false,
				"error": "GraphQL errors",
				"details": [{"message": "x"}]
			})
		);
	}

	#[rstest]
	fn test_page_envelope_success_shape() {
		let envelope = PageEnvelope::success(json!({"Heading": "News"}), "/news/", 1);

		assert_json_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({
				"success": true,
				"data": {"Heading": "News"},
				"path": "/news/",
				"count": 1
			})
		);
	}

	#[rstest]
	fn test_page_envelope_not_found_keeps_path() {
		let envelope = PageEnvelope::failure(&CmsError::NotFound("Page".into()), "/missing/");

		assert_json_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({
				"success": false,
				"path": "/missing/",
				"count": 0,
				"error": "Page not found"
			})
		);
	}
}
