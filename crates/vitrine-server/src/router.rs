use async_trait::async_trait;
use hyper::Method;
use std::collections::HashMap;
use std::sync::Arc;
use vitrine_http::{Handler, HttpResult, Request, Response};

/// A compiled route path.
///
/// Supports literal segments, `{name}` captures for a single segment, and a
/// trailing `*name` capture that swallows the remainder of the path:
///
/// ```
/// use vitrine_server::PathPattern;
///
/// let pattern = PathPattern::new("/branding/{tenant}/{asset}");
/// let params = pattern.matches("/branding/acme/favicon.ico").unwrap();
/// assert_eq!(params.get("tenant").map(String::as_str), Some("acme"));
///
/// let assets = PathPattern::new("/assets/*path");
/// let params = assets.matches("/assets/js/preview-bridge.js").unwrap();
/// assert_eq!(params.get("path").map(String::as_str), Some("js/preview-bridge.js"));
/// ```
///
/// Matching ignores trailing slashes, so `/preview` and `/preview/` are the
/// same route.
#[derive(Debug, Clone)]
pub struct PathPattern {
	segments: Vec<Segment>,
	tail: Option<String>,
}

#[derive(Debug, Clone)]
enum Segment {
	Literal(String),
	Param(String),
}

impl PathPattern {
	pub fn new(pattern: &str) -> Self {
		let mut segments = Vec::new();
		let mut tail = None;

		for part in pattern.split('/').filter(|part| !part.is_empty()) {
			if let Some(name) = part.strip_prefix('*') {
				// Wildcard terminates the pattern; anything after it is
				// unreachable and dropped.
				tail = Some(name.to_string());
				break;
			}
			if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
				segments.push(Segment::Param(name.to_string()));
			} else {
				segments.push(Segment::Literal(part.to_string()));
			}
		}

		Self { segments, tail }
	}

	/// Match a request path against this pattern, returning captured
	/// parameters on success.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

		if parts.len() < self.segments.len() {
			return None;
		}
		if self.tail.is_none() && parts.len() != self.segments.len() {
			return None;
		}

		let mut params = HashMap::new();
		for (segment, part) in self.segments.iter().zip(&parts) {
			match segment {
				Segment::Literal(expected) => {
					if expected != part {
						return None;
					}
				}
				Segment::Param(name) => {
					params.insert(name.clone(), (*part).to_string());
				}
			}
		}

		if let Some(name) = &self.tail {
			let rest = parts[self.segments.len()..].join("/");
			if rest.is_empty() {
				return None;
			}
			params.insert(name.clone(), rest);
		}

		Some(params)
	}
}

/// Route definition: a path pattern, the methods it accepts, and its handler.
#[derive(Clone)]
pub struct Route {
	pattern: PathPattern,
	methods: Vec<Method>,
	handler: Arc<dyn Handler>,
}

impl Route {
	/// A GET route. Also accepts HEAD; handlers that care about the
	/// distinction check `request.method` themselves.
	pub fn get(path: &str, handler: Arc<dyn Handler>) -> Self {
		Self {
			pattern: PathPattern::new(path),
			methods: vec![Method::GET, Method::HEAD],
			handler,
		}
	}

	/// A POST route.
	pub fn post(path: &str, handler: Arc<dyn Handler>) -> Self {
		Self {
			pattern: PathPattern::new(path),
			methods: vec![Method::POST],
			handler,
		}
	}

	/// Accept an additional method on this route.
	pub fn with_method(mut self, method: Method) -> Self {
		if !self.methods.contains(&method) {
			self.methods.push(method);
		}
		self
	}

	pub fn handler(&self) -> &dyn Handler {
		&*self.handler
	}

	fn accepts(&self, method: &Method) -> bool {
		self.methods.contains(method)
	}
}

/// Request router.
///
/// Routes are tried in registration order; the first one whose pattern and
/// method both match wins. A path that matches some pattern but no method
/// yields 405. Everything else goes to the fallback handler when one is set,
/// otherwise 404.
#[derive(Default)]
pub struct Router {
	routes: Vec<Route>,
	fallback: Option<Arc<dyn Handler>>,
}

impl Router {
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			fallback: None,
		}
	}

	pub fn add_route(&mut self, route: Route) {
		self.routes.push(route);
	}

	pub fn with_route(mut self, route: Route) -> Self {
		self.add_route(route);
		self
	}

	pub fn with_fallback(mut self, handler: Arc<dyn Handler>) -> Self {
		self.fallback = Some(handler);
		self
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	async fn dispatch(&self, mut request: Request) -> HttpResult<Response> {
		let path = request.path().to_string();
		let mut path_matched = false;

		for route in &self.routes {
			if let Some(params) = route.pattern.matches(&path) {
				if !route.accepts(&request.method) {
					path_matched = true;
					continue;
				}
				for (name, value) in params {
					request.set_path_param(name, value);
				}
				return route.handler().handle(request).await;
			}
		}

		if path_matched {
			return Ok(Response::method_not_allowed());
		}

		match &self.fallback {
			Some(fallback) => fallback.handle(request).await,
			None => Ok(Response::not_found()),
		}
	}
}

#[async_trait]
impl Handler for Router {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		self.dispatch(request).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bytes::Bytes;
	use hyper::StatusCode;
	use rstest::rstest;

	struct EchoHandler {
		label: &'static str,
	}

	#[async_trait]
	impl Handler for EchoHandler {
		async fn handle(&self, request: Request) -> HttpResult<Response> {
			let tenant = request.path_param("tenant").unwrap_or("-").to_string();
			Ok(Response::ok().with_body(format!("{}:{}", self.label, tenant)))
		}
	}

	fn request(method: Method, uri: &str) -> Request {
		Request::builder()
			.method(method)
			.uri(uri)
			.build()
			.unwrap()
	}

	#[rstest]
	#[case("/preview", "/preview", true)]
	#[case("/preview", "/preview/", true)]
	#[case("/preview", "/previews", false)]
	#[case("/api/optimizely/page", "/api/optimizely/page", true)]
	#[case("/api/optimizely/page", "/api/optimizely", false)]
	#[case("/", "/", true)]
	#[case("/", "/anything", false)]
	fn test_literal_patterns(#[case] pattern: &str, #[case] path: &str, #[case] hit: bool) {
		assert_eq!(PathPattern::new(pattern).matches(path).is_some(), hit);
	}

	#[rstest]
	fn test_param_capture() {
		let pattern = PathPattern::new("/branding/{tenant}/{asset}");

		let params = pattern.matches("/branding/acme/header.png").unwrap();
		assert_eq!(params.get("tenant").map(String::as_str), Some("acme"));
		assert_eq!(params.get("asset").map(String::as_str), Some("header.png"));

		assert!(pattern.matches("/branding/acme").is_none());
		assert!(pattern.matches("/branding/acme/a/b").is_none());
	}

	#[rstest]
	fn test_tail_capture_spans_segments() {
		let pattern = PathPattern::new("/assets/*path");

		let params = pattern.matches("/assets/js/preview-bridge.js").unwrap();
		assert_eq!(
			params.get("path").map(String::as_str),
			Some("js/preview-bridge.js")
		);

		// A bare /assets/ is not an asset request.
		assert!(pattern.matches("/assets").is_none());
		assert!(pattern.matches("/assets/").is_none());
	}

	#[tokio::test]
	async fn first_matching_route_wins() {
		let router = Router::new()
			.with_route(Route::get("/a", Arc::new(EchoHandler { label: "first" })))
			.with_route(Route::get("/a", Arc::new(EchoHandler { label: "second" })));

		let response = router.handle(request(Method::GET, "/a")).await.unwrap();
		assert_eq!(response.body, Bytes::from("first:-"));
	}

	#[tokio::test]
	async fn path_params_reach_the_handler() {
		let router = Router::new().with_route(Route::get(
			"/branding/{tenant}/{asset}",
			Arc::new(EchoHandler { label: "branding" }),
		));

		let response = router
			.handle(request(Method::GET, "/branding/acme/favicon.ico"))
			.await
			.unwrap();

		assert_eq!(response.body, Bytes::from("branding:acme"));
	}

	#[tokio::test]
	async fn wrong_method_on_known_path_is_405() {
		let router = Router::new()
			.with_route(Route::get("/preview", Arc::new(EchoHandler { label: "preview" })));

		let response = router
			.handle(request(Method::DELETE, "/preview"))
			.await
			.unwrap();

		assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
	}

	#[tokio::test]
	async fn get_routes_also_accept_head() {
		let router = Router::new()
			.with_route(Route::get("/health", Arc::new(EchoHandler { label: "health" })));

		let response = router
			.handle(request(Method::HEAD, "/health"))
			.await
			.unwrap();

		assert_eq!(response.status, StatusCode::OK);
	}

	#[tokio::test]
	async fn get_or_post_route_accepts_both() {
		let route = Route::get("/api/optimizely/preview-content", Arc::new(EchoHandler {
			label: "preview-content",
		}))
		.with_method(Method::POST);
		let router = Router::new().with_route(route);

		for method in [Method::GET, Method::POST] {
			let response = router
				.handle(request(method, "/api/optimizely/preview-content"))
				.await
				.unwrap();
			assert_eq!(response.status, StatusCode::OK);
		}
	}

	#[tokio::test]
	async fn unmatched_path_goes_to_fallback() {
		let router = Router::new()
			.with_route(Route::get("/health", Arc::new(EchoHandler { label: "health" })))
			.with_fallback(Arc::new(EchoHandler { label: "fallback" }));

		let response = router
			.handle(request(Method::GET, "/some/page/path"))
			.await
			.unwrap();

		assert_eq!(response.body, Bytes::from("fallback:-"));
	}

	#[tokio::test]
	async fn unmatched_path_without_fallback_is_404() {
		let router = Router::new();

		let response = router.handle(request(Method::GET, "/nope")).await.unwrap();
		assert_eq!(response.status, StatusCode::NOT_FOUND);
	}
}
