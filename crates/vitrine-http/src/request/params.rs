use super::Request;
use hyper::Uri;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::{HttpError, HttpResult};

impl Request {
	/// Parse query parameters from URI
	pub(super) fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter_map(|pair| {
						// Split on first '=' only to preserve '=' in values (e.g., Base64)
						let mut parts = pair.splitn(2, '=');
						Some((
							parts.next()?.to_string(),
							parts.next().unwrap_or("").to_string(),
						))
					})
					.collect()
			})
			.unwrap_or_default()
	}

	/// Get the request path
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Get a single query parameter, URL-decoded.
	///
	/// # Examples
	///
	/// ```
	/// use vitrine_http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/api/optimizely/page?path=news%2Fworld")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.query_param("path"), Some("news/world".to_string()));
	/// assert_eq!(request.query_param("missing"), None);
	/// ```
	pub fn query_param(&self, name: &str) -> Option<String> {
		self.query_params
			.get(name)
			.map(|v| percent_decode_str(v).decode_utf8_lossy().to_string())
	}

	/// Set a path parameter (used by the router for path variable extraction)
	pub fn set_path_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(key.into(), value.into());
	}

	/// Get a path parameter extracted by the router.
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(|s| s.as_str())
	}

	/// Get a header value as a string, if present and valid UTF-8.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// Extract a bearer token from the `Authorization` header.
	///
	/// Returns `None` when the header is absent or uses another scheme.
	///
	/// # Examples
	///
	/// ```
	/// use vitrine_http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/api/optimizely/preview-content")
	///     .header("Authorization", "Bearer abc123")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.bearer_token(), Some("abc123".to_string()));
	/// ```
	pub fn bearer_token(&self) -> Option<String> {
		let value = self.header("authorization").or_else(|| self.header("Authorization"))?;
		let token = value.strip_prefix("Bearer ").or_else(|| value.strip_prefix("bearer "))?;
		let token = token.trim();
		if token.is_empty() {
			None
		} else {
			Some(token.to_string())
		}
	}

	/// Deserialize the request body as JSON.
	pub fn json_body<T: DeserializeOwned>(&self) -> HttpResult<T> {
		serde_json::from_slice(&self.body)
			.map_err(|e| HttpError::InvalidRequest(format!("invalid JSON body: {}", e)))
	}
}
