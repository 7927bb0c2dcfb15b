use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};
use vitrine_http::{Handler, Middleware, MiddlewareChain, Request, Response};

use crate::shutdown::ShutdownCoordinator;

/// HTTP server with middleware support.
///
/// Holds the root handler and an ordered middleware stack; the stack is
/// folded into a [`MiddlewareChain`] when the server starts listening.
pub struct HttpServer {
	pub handler: Arc<dyn Handler>,
	pub(crate) middlewares: Vec<Arc<dyn Middleware>>,
}

impl HttpServer {
	/// Create a new server with the given root handler.
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			handler,
			middlewares: Vec::new(),
		}
	}

	/// Add a middleware. Middlewares run in the order they are added.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	/// Fold the middleware stack around the root handler.
	fn build_handler(&self) -> Arc<dyn Handler> {
		if self.middlewares.is_empty() {
			return self.handler.clone();
		}

		let mut chain = MiddlewareChain::new(self.handler.clone());
		for middleware in &self.middlewares {
			chain.add_middleware(middleware.clone());
		}

		Arc::new(chain)
	}

	/// Start the server and accept connections until an error occurs.
	///
	/// # Examples
	///
	/// ```no_run
	/// use std::net::SocketAddr;
	/// use std::sync::Arc;
	/// use vitrine_http::{Handler, Request, Response};
	/// use vitrine_server::HttpServer;
	///
	/// struct Hello;
	///
	/// #[async_trait::async_trait]
	/// impl Handler for Hello {
	///     async fn handle(&self, _request: Request) -> vitrine_http::HttpResult<Response> {
	///         Ok(Response::ok().with_body("hello"))
	///     }
	/// }
	///
	/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
	/// let addr: SocketAddr = "127.0.0.1:8080".parse()?;
	/// HttpServer::new(Arc::new(Hello)).listen(addr).await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn listen(self, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
		let listener = TcpListener::bind(addr).await?;
		info!(%addr, "server listening");

		let handler = self.build_handler();

		loop {
			let (stream, socket_addr) = listener.accept().await?;
			let handler = handler.clone();

			tokio::task::spawn(async move {
				if let Err(err) = Self::handle_connection(stream, socket_addr, handler).await {
					warn!(%socket_addr, error = %err, "connection error");
				}
			});
		}
	}

	/// Start the server with graceful shutdown support.
	///
	/// Accepts connections until the coordinator broadcasts shutdown, then
	/// stops accepting and signals completion so the caller can drain.
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> Result<(), Box<dyn std::error::Error>> {
		let listener = TcpListener::bind(addr).await?;
		info!(%addr, "server listening");

		let handler = self.build_handler();

		let mut shutdown_rx = coordinator.subscribe();

		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, socket_addr) = result?;
					let handler = handler.clone();
					let mut conn_shutdown = coordinator.subscribe();

					tokio::task::spawn(async move {
						tokio::select! {
							result = Self::handle_connection(stream, socket_addr, handler) => {
								if let Err(err) = result {
									warn!(%socket_addr, error = %err, "connection error");
								}
							}
							_ = conn_shutdown.recv() => {
								// Connection interrupted by shutdown.
							}
						}
					});
				}
				_ = shutdown_rx.recv() => {
					info!("shutdown signal received, draining connections");
					break;
				}
			}
		}

		coordinator.notify_shutdown_complete();

		Ok(())
	}

	/// Serve HTTP/1.1 on a single accepted TCP connection.
	pub async fn handle_connection(
		stream: TcpStream,
		socket_addr: SocketAddr,
		handler: Arc<dyn Handler>,
	) -> Result<(), Box<dyn std::error::Error>> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr: socket_addr,
		};

		http1::Builder::new().serve_connection(io, service).await?;

		Ok(())
	}
}

/// Service implementation bridging hyper requests into [`Request`] values.
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body_bytes = body.collect().await?.to_bytes();

			let mut request = Request::new(
				parts.method,
				parts.uri,
				parts.version,
				parts.headers,
				body_bytes,
			);
			request.remote_addr = Some(remote_addr);

			let response = handler.handle(request).await.unwrap_or_else(|err| {
				error!(error = %err, "handler error");
				Response::internal_server_error()
			});

			let mut hyper_response = hyper::Response::builder().status(response.status);
			for (key, value) in response.headers.iter() {
				hyper_response = hyper_response.header(key, value);
			}

			Ok(hyper_response.body(Full::new(response.body))?)
		})
	}
}

/// Create and run a server on `addr`.
pub async fn serve(
	addr: SocketAddr,
	handler: Arc<dyn Handler>,
) -> Result<(), Box<dyn std::error::Error>> {
	let server = HttpServer::new(handler);
	server.listen(addr).await
}

/// Create and run a server with graceful shutdown.
///
/// Pair with [`crate::shutdown_signal`]:
///
/// ```no_run
/// use std::net::SocketAddr;
/// use std::sync::Arc;
/// use std::time::Duration;
/// use vitrine_http::{Handler, Request, Response};
/// use vitrine_server::{ShutdownCoordinator, serve_with_shutdown, shutdown_signal};
///
/// struct Hello;
///
/// #[async_trait::async_trait]
/// impl Handler for Hello {
///     async fn handle(&self, _request: Request) -> vitrine_http::HttpResult<Response> {
///         Ok(Response::ok())
///     }
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let addr: SocketAddr = "127.0.0.1:8080".parse()?;
/// let coordinator = ShutdownCoordinator::new(Duration::from_secs(30));
///
/// tokio::select! {
///     result = serve_with_shutdown(addr, Arc::new(Hello), coordinator.clone()) => {
///         result?;
///     }
///     _ = shutdown_signal() => {
///         coordinator.shutdown();
///         coordinator.wait_for_shutdown().await;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn serve_with_shutdown(
	addr: SocketAddr,
	handler: Arc<dyn Handler>,
	coordinator: ShutdownCoordinator,
) -> Result<(), Box<dyn std::error::Error>> {
	let server = HttpServer::new(handler);
	server.listen_with_shutdown(addr, coordinator).await
}
