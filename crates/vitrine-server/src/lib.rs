//! HTTP/1.1 server for the vitrine site.
//!
//! Wraps hyper behind the [`vitrine_http::Handler`] trait: the serve loop
//! accepts TCP connections, collects each request body, hands the request to
//! the configured handler (usually a [`Router`] behind a middleware chain),
//! and writes the response back. Graceful shutdown drains the accept loop on
//! SIGINT/SIGTERM.

pub mod logging;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod statics;

pub use logging::RequestLogMiddleware;
pub use router::{PathPattern, Route, Router};
pub use server::{HttpServer, serve, serve_with_shutdown};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
pub use statics::{StaticAsset, content_type_for_path, serve_asset, serve_disk_file};
