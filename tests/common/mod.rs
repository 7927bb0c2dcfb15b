//! Shared fixtures for the route-level tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hyper::Method;
use serde_json::{Value, json};
use url::Url;

use vitrine::{AppState, Settings, build_router};
use vitrine_cms::{AuthMode, CmsError, CmsGateway, CmsResult, GraphqlTransport};
use vitrine_http::{Request, Response};
use vitrine_server::Router;

/// One recorded GraphQL exchange.
#[derive(Debug, Clone)]
pub struct RecordedCall {
	pub query: String,
	pub variables: Value,
	pub auth: AuthMode,
}

type Responder = Box<dyn Fn(&Value) -> CmsResult<Value> + Send + Sync>;

/// Transport double: answers by query name and records every exchange.
///
/// Scripts are matched against the query text in registration order; a
/// query no script claims gets an empty `_Content` result.
pub struct ScriptedTransport {
	scripts: Vec<(&'static str, Responder)>,
	calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
	pub fn new() -> Self {
		Self {
			scripts: Vec::new(),
			calls: Mutex::new(Vec::new()),
		}
	}

	/// Answer queries containing `marker` with a fixed response body.
	pub fn on(mut self, marker: &'static str, response: Value) -> Self {
		self.scripts
			.push((marker, Box::new(move |_| Ok(response.clone()))));
		self
	}

	/// Fail queries containing `marker` with the built error.
	pub fn failing(mut self, marker: &'static str, build: fn() -> CmsError) -> Self {
		self.scripts.push((marker, Box::new(move |_| Err(build()))));
		self
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl GraphqlTransport for ScriptedTransport {
	async fn execute(&self, query: &str, variables: Value, auth: &AuthMode) -> CmsResult<Value> {
		self.calls.lock().unwrap().push(RecordedCall {
			query: query.to_string(),
			variables: variables.clone(),
			auth: auth.clone(),
		});

		for (marker, respond) in &self.scripts {
			if query.contains(marker) {
				return respond(&variables);
			}
		}
		Ok(json!({"data": {"_Content": {"items": []}}}))
	}
}

pub fn test_settings(public_dir: PathBuf) -> Settings {
	Settings {
		graphql_url: Url::parse("http://cms.invalid/content/v2").unwrap(),
		app_key: Some("delivery-key".to_string()),
		bind_addr: "127.0.0.1:0".parse().unwrap(),
		public_dir,
		communication_script_url: "http://cms.invalid/util/javascript/communicationinjector.js"
			.to_string(),
	}
}

/// The full route table over a scripted transport.
pub fn router_with(transport: Arc<ScriptedTransport>) -> Router {
	router_with_public_dir(transport, std::env::temp_dir())
}

pub fn router_with_public_dir(transport: Arc<ScriptedTransport>, public_dir: PathBuf) -> Router {
	let gateway = CmsGateway::new(transport);
	let state = AppState::with_gateway(test_settings(public_dir), Arc::new(gateway));
	build_router(Arc::new(state))
}

/// A GraphQL response body with `items` under the given root field.
pub fn items_response(root: &str, items: Value) -> Value {
	json!({"data": {root: {"items": items}}})
}

/// A minimal page item whose main content area holds one hero block.
pub fn page_item(key: &str, title: &str) -> Value {
	json!({
		"_metadata": {
			"key": key,
			"types": ["LandingPage", "_Page"],
			"displayName": title
		},
		"Heading": title,
		"MainContentArea": [{
			"_metadata": {"key": "hero-1", "types": ["Hero"], "displayName": "Hero"},
			"Heading": "Hero heading"
		}]
	})
}

pub fn get(uri: &str) -> Request {
	Request::builder()
		.method(Method::GET)
		.uri(uri)
		.build()
		.unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request {
	Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header("content-type", "application/json")
		.body(body.to_string())
		.build()
		.unwrap()
}

pub fn body_json(response: &Response) -> Value {
	serde_json::from_slice(&response.body).unwrap()
}

pub fn body_html(response: &Response) -> String {
	String::from_utf8(response.body.to_vec()).unwrap()
}
