//! Route handlers, grouped by surface: the JSON API, the branding and
//! theme endpoints, server-rendered pages, and the preview route.

pub mod api;
pub mod branding;
pub mod pages;
pub mod preview;

use hyper::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use vitrine_cms::{ApiEnvelope, CmsError};
use vitrine_http::{HttpError, HttpResult, Request, Response};
use vitrine_pages::PagesError;

/// HTTP status for a CMS error, per the error taxonomy.
pub(crate) fn error_status(error: &CmsError) -> StatusCode {
	StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Template failures are programmer errors and surface as plain 500s.
pub(crate) fn render_failure(error: PagesError) -> HttpError {
	HttpError::Handler(error.to_string())
}

/// Failure envelope with the taxonomy status.
pub(crate) fn api_failure(error: &CmsError) -> HttpResult<Response> {
	Response::new(error_status(error)).with_json(&ApiEnvelope::from(error))
}

/// Success envelope around any serializable payload.
pub(crate) fn api_success<T: Serialize>(data: &T) -> HttpResult<Response> {
	let value = serde_json::to_value(data).map_err(|e| HttpError::Serialization(e.to_string()))?;
	Response::ok().with_json(&ApiEnvelope::success(value))
}

/// 400 envelope for a request missing a required parameter.
pub(crate) fn missing_param(name: &str) -> HttpResult<Response> {
	Response::bad_request().with_json(&ApiEnvelope::failure(format!(
		"Missing required parameter: {name}"
	)))
}

/// A request parameter from the query string or, on POST, the JSON body.
///
/// The GET and POST variants of an API route accept the same names either
/// way; empty values count as absent in both places.
pub(crate) fn param(request: &Request, name: &str) -> Option<String> {
	if let Some(value) = request.query_param(name)
		&& !value.is_empty()
	{
		return Some(value);
	}
	if request.method == Method::POST
		&& let Ok(body) = request.json_body::<Value>()
		&& let Some(value) = body.get(name).and_then(Value::as_str)
		&& !value.is_empty()
	{
		return Some(value.to_string());
	}
	None
}

/// The demo tenant header, whichever spelling the client used.
pub(crate) fn tenant_header(request: &Request) -> Option<String> {
	request
		.header("cms_demo")
		.or_else(|| request.header("cms-demo"))
		.map(str::to_string)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn param_prefers_the_query_string() {
		let request = Request::builder()
			.method(Method::POST)
			.uri("/api/optimizely/block?key=from-query")
			.body(r#"{"key":"from-body"}"#)
			.build()
			.unwrap();

		assert_eq!(param(&request, "key").as_deref(), Some("from-query"));
	}

	#[test]
	fn param_falls_back_to_the_post_body() {
		let request = Request::builder()
			.method(Method::POST)
			.uri("/api/optimizely/block")
			.body(r#"{"key":"from-body","loc":"en"}"#)
			.build()
			.unwrap();

		assert_eq!(param(&request, "key").as_deref(), Some("from-body"));
		assert_eq!(param(&request, "loc").as_deref(), Some("en"));
	}

	#[test]
	fn get_requests_never_read_the_body() {
		let request = Request::builder()
			.method(Method::GET)
			.uri("/api/optimizely/block")
			.body(r#"{"key":"from-body"}"#)
			.build()
			.unwrap();

		assert_eq!(param(&request, "key"), None);
	}

	#[test]
	fn empty_values_count_as_absent() {
		let request = Request::builder()
			.method(Method::POST)
			.uri("/api/optimizely/block?key=")
			.body(r#"{"key":""}"#)
			.build()
			.unwrap();

		assert_eq!(param(&request, "key"), None);
	}

	#[test]
	fn tenant_header_accepts_both_spellings() {
		let underscore = Request::builder()
			.uri("/api/branding")
			.header("cms_demo", "Acme")
			.build()
			.unwrap();
		let hyphen = Request::builder()
			.uri("/api/branding")
			.header("cms-demo", "Acme")
			.build()
			.unwrap();
		let none = Request::builder().uri("/api/branding").build().unwrap();

		assert_eq!(tenant_header(&underscore).as_deref(), Some("Acme"));
		assert_eq!(tenant_header(&hyphen).as_deref(), Some("Acme"));
		assert_eq!(tenant_header(&none), None);
	}

	#[test]
	fn api_failure_maps_taxonomy_statuses() {
		let graphql = api_failure(&CmsError::GraphqlErrors(json!([{"message": "x"}]))).unwrap();
		assert_eq!(graphql.status, StatusCode::BAD_REQUEST);

		let not_found = api_failure(&CmsError::NotFound("Block".into())).unwrap();
		assert_eq!(not_found.status, StatusCode::NOT_FOUND);

		let transport = api_failure(&CmsError::Transport("refused".into())).unwrap();
		assert_eq!(transport.status, StatusCode::INTERNAL_SERVER_ERROR);
	}
}
