//! Branding and theme echoes plus the static asset routes.

use std::sync::Arc;

use async_trait::async_trait;

use vitrine_http::{Handler, HttpResult, Request, Response};
use vitrine_pages::{BRANDING_ASSETS, PREVIEW_BRIDGE_JS, SITE_CSS, ThemeConfig};
use vitrine_server::{StaticAsset, serve_asset, serve_disk_file};

use crate::routes::{api_success, tenant_header};
use crate::state::AppState;

/// `GET /api/branding` echoes the branding the page routes would apply
/// for the caller's tenant header.
pub struct BrandingEchoHandler {
	state: Arc<AppState>,
}

impl BrandingEchoHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for BrandingEchoHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let tenant = tenant_header(&request);
		let config = self.state.branding.resolve(tenant.as_deref()).await;
		api_success(&config)
	}
}

/// `GET /api/theme` echoes the theme derived from the `clientId` header.
pub struct ThemeEchoHandler;

#[async_trait]
impl Handler for ThemeEchoHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		api_success(&ThemeConfig::from_client_id(request.header("clientId")))
	}
}

/// `GET|HEAD /branding/{tenant}/{asset}` serves tenant override files.
///
/// Only the three known asset names are served; anything else is 404
/// without touching the disk. HEAD is what the resolver's probes use.
pub struct BrandingAssetHandler {
	state: Arc<AppState>,
}

impl BrandingAssetHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for BrandingAssetHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let (Some(tenant), Some(asset)) =
			(request.path_param("tenant"), request.path_param("asset"))
		else {
			return Ok(Response::not_found());
		};
		if !BRANDING_ASSETS.iter().any(|known| *known == asset) {
			return Ok(Response::not_found());
		}

		let relative = format!("{}/{asset}", tenant.to_lowercase());
		Ok(serve_disk_file(&request, self.state.branding.public_dir(), &relative).await)
	}
}

/// `GET /assets/*path` serves the embedded client assets.
pub struct AssetsHandler;

#[async_trait]
impl Handler for AssetsHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let response = match request.path_param("path").unwrap_or_default() {
			"preview-bridge.js" => serve_asset(
				&request,
				&StaticAsset::new("preview-bridge.js", PREVIEW_BRIDGE_JS.as_bytes()),
			),
			"site.css" => serve_asset(
				&request,
				&StaticAsset::new("site.css", SITE_CSS.as_bytes()),
			),
			_ => Response::not_found(),
		};
		Ok(response)
	}
}
