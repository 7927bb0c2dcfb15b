//! Environment-driven settings, read once at startup.
//!
//! Every variable carries the `VITRINE_` prefix. Only the GraphQL
//! endpoint is required; the delivery key is optional here because its
//! absence only matters once a key-mode request is actually made.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const PREFIX: &str = "VITRINE_";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	ParseError {
		key: String,
		/// Length of the original value, stored instead of the raw value to
		/// prevent secret leakage
		value_len: usize,
		error: String,
	},
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct Settings {
	/// Upstream GraphQL endpoint.
	pub graphql_url: Url,
	/// Delivery API key for key-mode requests.
	pub app_key: Option<String>,
	/// Address the server binds to.
	pub bind_addr: SocketAddr,
	/// Directory holding tenant branding assets.
	pub public_dir: PathBuf,
	/// Editor communication script injected by the preview bridge.
	pub communication_script_url: String,
}

impl Settings {
	pub fn from_env() -> Result<Self, ConfigError> {
		let graphql_url: Url = parse(&required("GRAPHQL_URL")?, "GRAPHQL_URL")?;
		let bind_addr: SocketAddr = parse(
			&with_default("BIND_ADDR", DEFAULT_BIND_ADDR),
			"BIND_ADDR",
		)?;

		let communication_script_url = optional("COMMUNICATION_SCRIPT_URL")
			.unwrap_or_else(|| default_communication_script(&graphql_url));

		Ok(Self {
			graphql_url,
			app_key: optional("APP_KEY"),
			bind_addr,
			public_dir: PathBuf::from(with_default("PUBLIC_DIR", DEFAULT_PUBLIC_DIR)),
			communication_script_url,
		})
	}
}

/// The CMS hosts its own editor-communication script, so the default is
/// derived from the GraphQL endpoint's origin.
fn default_communication_script(graphql_url: &Url) -> String {
	format!(
		"{}/util/javascript/communicationinjector.js",
		graphql_url.origin().ascii_serialization()
	)
}

fn key_name(key: &str) -> String {
	format!("{PREFIX}{key}")
}

fn required(key: &str) -> Result<String, ConfigError> {
	let full = key_name(key);
	env::var(&full).map_err(|_| ConfigError::MissingVariable(full))
}

fn optional(key: &str) -> Option<String> {
	env::var(key_name(key)).ok().filter(|v| !v.is_empty())
}

fn with_default(key: &str, default: &str) -> String {
	env::var(key_name(key)).unwrap_or_else(|_| default.to_string())
}

fn parse<T>(value: &str, key: &str) -> Result<T, ConfigError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	value.parse().map_err(|e: T::Err| ConfigError::ParseError {
		key: key_name(key),
		value_len: value.len(),
		error: e.to_string(),
	})
}
