use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use crate::config::{AuthMode, CmsConfig};
use crate::error::{CmsError, CmsResult};

/// Raw GraphQL POST transport.
///
/// The gateway is written against this seam so tests can substitute a
/// canned-response double for the network.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
	/// Execute one GraphQL request and return the decoded response body.
	async fn execute(&self, query: &str, variables: Value, auth: &AuthMode) -> CmsResult<Value>;
}

/// Production transport on top of `reqwest`.
pub struct HttpTransport {
	config: CmsConfig,
	client: reqwest::Client,
}

impl HttpTransport {
	/// Create a transport with a default client.
	pub fn new(config: CmsConfig) -> Self {
		Self {
			config,
			client: reqwest::Client::new(),
		}
	}

	/// Create a transport with a custom reqwest client (timeouts, proxies).
	pub fn with_client(config: CmsConfig, client: reqwest::Client) -> Self {
		Self { config, client }
	}

	/// Endpoint for the given auth mode.
	///
	/// Key mode appends the delivery key as the `auth` query parameter and
	/// fails without one configured. Token mode leaves the URL untouched --
	/// the credential travels in the header instead.
	fn endpoint_for(&self, auth: &AuthMode) -> CmsResult<Url> {
		let mut url = self.config.graphql_url.clone();
		if let AuthMode::AppKey = auth {
			let key = self
				.config
				.app_key
				.as_deref()
				.ok_or(CmsError::MissingApiKey)?;
			url.query_pairs_mut().append_pair("auth", key);
		}
		Ok(url)
	}

	/// Map a non-success upstream response to a structured error.
	///
	/// The body is kept as JSON when it parses, raw text otherwise. A 401
	/// in token mode gets the expiry hint: upstream preview tokens live
	/// five minutes and this is by far the most common failure editors hit.
	fn upstream_error(status: u16, text: String, auth: &AuthMode) -> CmsError {
		let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
		let hint = (status == 401 && auth.is_preview()).then(CmsError::token_expiry_hint);
		CmsError::UpstreamStatus { status, body, hint }
	}

	/// Build the outgoing request without sending it.
	///
	/// Every request disables caching so preview edits are always fresh.
	fn build_request(
		&self,
		query: &str,
		variables: &Value,
		auth: &AuthMode,
	) -> CmsResult<reqwest::Request> {
		let url = self.endpoint_for(auth)?;
		let payload = json!({ "query": query, "variables": variables });

		let mut builder = self
			.client
			.post(url)
			.header(reqwest::header::CACHE_CONTROL, "no-store")
			.json(&payload);
		if let AuthMode::PreviewToken(token) = auth {
			builder = builder.bearer_auth(token);
		}

		builder
			.build()
			.map_err(|e| CmsError::Transport(e.to_string()))
	}
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
	async fn execute(&self, query: &str, variables: Value, auth: &AuthMode) -> CmsResult<Value> {
		let request = self.build_request(query, &variables, auth)?;
		let response = self
			.client
			.execute(request)
			.await
			.map_err(|e| CmsError::Transport(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let text = response.text().await.unwrap_or_default();
			return Err(Self::upstream_error(status.as_u16(), text, auth));
		}

		response
			.json::<Value>()
			.await
			.map_err(|e| CmsError::Transport(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn config() -> CmsConfig {
		CmsConfig::new("https://cg.example.com/content/v2".parse().unwrap())
			.with_app_key("public-key")
	}

	const QUERY: &str = "query { _Content { items { _metadata { key } } } }";

	#[rstest]
	fn test_key_mode_puts_key_in_query_string(config: CmsConfig) {
		let transport = HttpTransport::new(config);

		let request = transport
			.build_request(QUERY, &json!({}), &AuthMode::AppKey)
			.unwrap();

		let query = request.url().query().unwrap_or_default();
		assert!(query.contains("auth=public-key"));
		assert!(request.headers().get("authorization").is_none());
	}

	#[rstest]
	fn test_token_mode_puts_token_in_header_only(config: CmsConfig) {
		let transport = HttpTransport::new(config);
		let auth = AuthMode::PreviewToken("draft-token".to_string());

		let request = transport.build_request(QUERY, &json!({}), &auth).unwrap();

		assert!(request.url().query().unwrap_or_default().is_empty());
		assert_eq!(
			request
				.headers()
				.get("authorization")
				.unwrap()
				.to_str()
				.unwrap(),
			"Bearer draft-token"
		);
	}

	#[rstest]
	fn test_key_mode_without_key_is_a_config_error() {
		let config = CmsConfig::new("https://cg.example.com/content/v2".parse().unwrap());
		let transport = HttpTransport::new(config);

		let result = transport.build_request(QUERY, &json!({}), &AuthMode::AppKey);

		assert!(matches!(result, Err(CmsError::MissingApiKey)));
	}

	#[rstest]
	#[case(AuthMode::AppKey)]
	#[case(AuthMode::PreviewToken("t".to_string()))]
	fn test_every_request_disables_caching(config: CmsConfig, #[case] auth: AuthMode) {
		let transport = HttpTransport::new(config);

		let request = transport.build_request(QUERY, &json!({}), &auth).unwrap();

		assert_eq!(
			request
				.headers()
				.get("cache-control")
				.unwrap()
				.to_str()
				.unwrap(),
			"no-store"
		);
	}

	#[rstest]
	fn test_payload_carries_query_and_variables(config: CmsConfig) {
		let transport = HttpTransport::new(config);
		let variables = json!({"path": "/news/"});

		let request = transport
			.build_request(QUERY, &variables, &AuthMode::AppKey)
			.unwrap();

		let body = request.body().and_then(|b| b.as_bytes()).unwrap();
		let payload: Value = serde_json::from_slice(body).unwrap();
		assert_eq!(payload["query"], json!(QUERY));
		assert_eq!(payload["variables"], variables);
	}

	#[rstest]
	fn test_upstream_error_parses_json_body() {
		let error = HttpTransport::upstream_error(
			500,
			r#"{"detail":"boom"}"#.to_string(),
			&AuthMode::AppKey,
		);

		match error {
			CmsError::UpstreamStatus { status, body, hint } => {
				assert_eq!(status, 500);
				assert_eq!(body, json!({"detail": "boom"}));
				assert!(hint.is_none());
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn test_upstream_error_falls_back_to_raw_text() {
		let error = HttpTransport::upstream_error(
			502,
			"Bad Gateway".to_string(),
			&AuthMode::AppKey,
		);

		match error {
			CmsError::UpstreamStatus { body, .. } => {
				assert_eq!(body, json!("Bad Gateway"));
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn test_401_in_token_mode_gets_expiry_hint() {
		let auth = AuthMode::PreviewToken("stale".to_string());

		let error = HttpTransport::upstream_error(401, String::new(), &auth);

		match error {
			CmsError::UpstreamStatus { status, hint, .. } => {
				assert_eq!(status, 401);
				assert_eq!(hint.as_deref(), Some("preview token may be expired (5 minute TTL)"));
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn test_401_in_key_mode_has_no_hint() {
		let error = HttpTransport::upstream_error(401, String::new(), &AuthMode::AppKey);

		match error {
			CmsError::UpstreamStatus { hint, .. } => assert!(hint.is_none()),
			other => panic!("unexpected error: {other:?}"),
		}
	}
}
