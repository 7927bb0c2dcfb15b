use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use vitrine_http::{Handler, HttpResult, Middleware, Request, Response};

/// Request logging middleware.
///
/// Logs each request with its method, path, response status, and elapsed
/// time. Handler errors are logged at error level before they propagate.
pub struct RequestLogMiddleware;

impl RequestLogMiddleware {
	pub fn new() -> Self {
		Self
	}
}

impl Default for RequestLogMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for RequestLogMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> HttpResult<Response> {
		let start = Instant::now();
		let method = request.method.to_string();
		let path = request.path().to_string();

		let result = next.handle(request).await;

		let elapsed_ms = start.elapsed().as_millis() as u64;
		match &result {
			Ok(response) => {
				info!(
					%method,
					%path,
					status = response.status.as_u16(),
					elapsed_ms,
					"request"
				);
			}
			Err(err) => {
				error!(%method, %path, error = %err, elapsed_ms, "request failed");
			}
		}

		result
	}
}
