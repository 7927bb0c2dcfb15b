use async_trait::async_trait;
use std::sync::Arc;

use crate::{HttpResult, Request, Response};

/// Handler trait for processing requests
/// This is the core abstraction - all request handlers implement this
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> HttpResult<Response>;
}

/// Blanket implementation for `Arc<T>` where T: Handler
/// This allows `Arc<dyn Handler>` to be used as a Handler
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		(**self).handle(request).await
	}
}

/// Middleware trait for request/response processing
/// Uses composition pattern instead of inheritance
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> HttpResult<Response>;

	/// Determines whether this middleware should be executed for the given request.
	///
	/// Middleware that only applies to part of the route surface (e.g. the
	/// `/api/` prefix) can skip itself here instead of branching inside
	/// `process`.
	fn should_continue(&self, _request: &Request) -> bool {
		true
	}
}

/// Middleware chain - composes multiple middleware
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	/// Creates a new middleware chain with the given handler.
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	/// Adds a middleware to the chain using builder pattern.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	/// Adds a middleware to the chain.
	pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
		self.middlewares.push(middleware);
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		if self.middlewares.is_empty() {
			return self.handler.handle(request).await;
		}

		// Build the nested handler chain by composition, innermost first.
		// Middleware whose should_continue declines the request is skipped.
		let mut current_handler = self.handler.clone();

		let active_middlewares: Vec<_> = self
			.middlewares
			.iter()
			.rev()
			.filter(|mw| mw.should_continue(&request))
			.collect();

		for middleware in active_middlewares {
			let mw = middleware.clone();
			let handler = current_handler.clone();

			current_handler = Arc::new(ComposedHandler {
				middleware: mw,
				next: handler,
			});
		}

		current_handler.handle(request).await
	}
}

/// Internal handler that composes one middleware with the next handler
struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}
