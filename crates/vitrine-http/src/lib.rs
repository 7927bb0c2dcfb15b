//! HTTP primitives for the vitrine site server.
//!
//! This crate defines the request/response types that flow through the
//! server, the [`Handler`] and [`Middleware`] abstractions every route is
//! built on, and small helpers shared by the route layer (content path
//! normalization, query parameter decoding).

mod error;
mod handler;
mod path;
mod request;
mod response;

pub use error::{HttpError, HttpResult};
pub use handler::{Handler, Middleware, MiddlewareChain};
pub use path::normalize_content_path;
pub use request::{Request, RequestBuilder};
pub use response::Response;
