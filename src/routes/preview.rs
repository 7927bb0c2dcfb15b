//! The editor-facing preview route.
//!
//! Renders the draft the editor is on like any other page, then wraps it
//! with the bridge config block and script tag so the client half can
//! talk to the editor frame.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use vitrine_cms::{CmsError, resolve_page_blocks};
use vitrine_http::{Handler, HttpResult, Request, Response};
use vitrine_pages::{
	BridgeConfig, ContextMode, PreviewParams, RenderContext, page_title, render_error_panel,
	render_missing_key_page, render_page_body, render_preview_shell,
};

use crate::routes::pages::page_shell;
use crate::routes::{error_status, render_failure};
use crate::state::AppState;

/// `GET /preview?key=...&ver=...&loc=...&ctx=...&preview_token=...`
pub struct PreviewPageHandler {
	state: Arc<AppState>,
}

impl PreviewPageHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}

	/// Diagnostic panel with the request's parameters echoed back, minus
	/// the token value.
	async fn error_response(
		&self,
		request: &Request,
		params: &PreviewParams,
		error: &CmsError,
	) -> HttpResult<Response> {
		let panel = render_error_panel(&error.to_string(), error.details().as_ref(), &params.echo())
			.map_err(render_failure)?;
		let shell = page_shell(&self.state, request, "Preview unavailable").await;
		let html = shell.render(&panel).map_err(render_failure)?;
		Ok(Response::new(error_status(error)).with_html(html))
	}
}

#[async_trait]
impl Handler for PreviewPageHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let params = PreviewParams {
			key: request.query_param("key"),
			version: request.query_param("ver"),
			locale: request.query_param("loc"),
			mode: ContextMode::from_query(request.query_param("ctx").as_deref()),
			preview_token: request
				.query_param("preview_token")
				.or_else(|| request.bearer_token()),
		};

		// Opened outside the editor: explain instead of erroring
		let Some(preview) = params.to_request() else {
			let body = render_missing_key_page().map_err(render_failure)?;
			let shell = page_shell(&self.state, &request, "Preview unavailable").await;
			let html = shell.render(&body).map_err(render_failure)?;
			return Ok(Response::ok().with_html(html));
		};

		match self.state.gateway.fetch_preview_content(&preview).await {
			Ok(Some(page)) => {
				let blocks = resolve_page_blocks(&page);
				let ctx = RenderContext::new(self.state.gateway.clone())
					.with_mode(params.mode)
					.with_preview(true);
				let blocks_html = self.state.registry.render_blocks(&blocks, &ctx).await;
				let body = render_page_body(&page, &blocks_html).map_err(render_failure)?;
				let config =
					BridgeConfig::new(&params, &self.state.settings.communication_script_url);
				let framed = render_preview_shell(&body, &config).map_err(render_failure)?;
				let shell = page_shell(&self.state, &request, &page_title(&page)).await;
				let html = shell.render(&framed).map_err(render_failure)?;
				Ok(Response::ok().with_html(html))
			}
			Ok(None) => {
				let error = CmsError::NotFound("Preview content".to_string());
				self.error_response(&request, &params, &error).await
			}
			Err(e) => {
				warn!(key = %preview.key, error = %e, "preview fetch failed");
				self.error_response(&request, &params, &e).await
			}
		}
	}
}
