//! # Vitrine
//!
//! Server-rendered marketing site backed by a headless CMS. Pages are
//! fetched over the CMS's GraphQL API, composed from typed blocks, and
//! rendered to plain HTML; a small JSON API exposes the same lookups for
//! tooling, and a preview route hosts the CMS editor's live-reload
//! bridge.
//!
//! The pieces live in dedicated crates:
//!
//! - `vitrine-http`: request/response types and the handler and
//!   middleware traits
//! - `vitrine-server`: the hyper serve loop, router, logging and static
//!   file handling
//! - `vitrine-cms`: the GraphQL gateway, content model and composition
//!   resolver
//! - `vitrine-pages`: templates, block renderers, branding and the
//!   preview bridge
//!
//! This crate wires them into the application: configuration from the
//! environment, the route table, and process lifecycle.

pub mod app;
pub mod config;
pub mod routes;
pub mod state;

pub use app::{build_app, build_router};
pub use config::{ConfigError, Settings};
pub use state::AppState;
