//! Server side of the preview surface.
//!
//! The preview route fetches the draft the editor is on, renders it like
//! any other page, and plants two things for the client bridge: a JSON
//! config block and the bridge script tag. The bridge script itself is
//! embedded here and served as a static asset.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use vitrine_cms::PreviewRequest;

use crate::context::ContextMode;
use crate::engine;
use crate::error::PagesResult;

/// Client half of the bridge, served at [`BRIDGE_SCRIPT_ROUTE`].
pub static PREVIEW_BRIDGE_JS: &str = include_str!("../assets/preview-bridge.js");

/// Where the static handler exposes the bridge script.
pub const BRIDGE_SCRIPT_ROUTE: &str = "/assets/preview-bridge.js";

pub const POLL_INTERVAL_MS: u32 = 100;
pub const POLL_TIMEOUT_MS: u32 = 5000;

/// Query parameters of the preview page route, as sent by the editor.
#[derive(Debug, Clone, Default)]
pub struct PreviewParams {
	pub key: Option<String>,
	pub version: Option<String>,
	pub locale: Option<String>,
	pub mode: ContextMode,
	pub preview_token: Option<String>,
}

impl PreviewParams {
	/// The gateway request, when the editor sent a key at all.
	pub fn to_request(&self) -> Option<PreviewRequest> {
		let key = self.key.clone()?;
		Some(PreviewRequest {
			key,
			version: self.version.clone(),
			locale: self.locale.clone(),
			preview_token: self.preview_token.clone(),
		})
	}

	/// Parameter echo for the error panel.
	///
	/// The token value never reaches the page; only its presence does.
	pub fn echo(&self) -> BTreeMap<String, String> {
		let mut params = BTreeMap::new();
		if let Some(key) = &self.key {
			params.insert("key".to_string(), key.clone());
		}
		if let Some(version) = &self.version {
			params.insert("ver".to_string(), version.clone());
		}
		if let Some(locale) = &self.locale {
			params.insert("loc".to_string(), locale.clone());
		}
		params.insert("ctx".to_string(), self.mode.as_str().to_string());
		if self.preview_token.is_some() {
			params.insert("preview_token".to_string(), "(present)".to_string());
		}
		params
	}
}

/// Config block the client bridge reads before doing anything.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
	pub key: String,
	pub version: String,
	pub locale: String,
	pub context_mode: String,
	pub has_token: bool,
	pub poll_interval_ms: u32,
	pub poll_timeout_ms: u32,
	pub communication_script_url: String,
}

impl BridgeConfig {
	pub fn new(params: &PreviewParams, communication_script_url: &str) -> Self {
		Self {
			key: params.key.clone().unwrap_or_default(),
			version: params.version.clone().unwrap_or_default(),
			locale: params.locale.clone().unwrap_or_default(),
			context_mode: params.mode.as_str().to_string(),
			has_token: params.preview_token.is_some(),
			poll_interval_ms: POLL_INTERVAL_MS,
			poll_timeout_ms: POLL_TIMEOUT_MS,
			communication_script_url: communication_script_url.to_string(),
		}
	}
}

#[derive(Serialize)]
struct PreviewShellView {
	content: String,
	config_json: String,
	bridge_src: String,
}

/// Wraps rendered preview content with the bridge config and script tag.
pub fn render_preview_shell(content_html: &str, config: &BridgeConfig) -> PagesResult<String> {
	let view = PreviewShellView {
		content: content_html.to_string(),
		config_json: serde_json::to_string(config)?,
		bridge_src: BRIDGE_SCRIPT_ROUTE.to_string(),
	};
	engine::render_with("preview.html", &view)
}

/// Diagnostic page for a preview request without a content key.
pub fn render_missing_key_page() -> PagesResult<String> {
	engine::render("preview_missing_key.html", &tera::Context::new())
}

#[derive(Serialize)]
struct ErrorPanelView {
	error: String,
	details_json: String,
	has_params: bool,
	params: BTreeMap<String, String>,
}

/// Error panel shown inside the preview frame when the fetch fails.
pub fn render_error_panel(
	error: &str,
	details: Option<&Value>,
	params: &BTreeMap<String, String>,
) -> PagesResult<String> {
	let details_json = match details {
		Some(value) => serde_json::to_string_pretty(value)?,
		None => String::new(),
	};
	let view = ErrorPanelView {
		error: error.to_string(),
		details_json,
		has_params: !params.is_empty(),
		params: params.clone(),
	};
	engine::render_with("error_panel.html", &view)
}
