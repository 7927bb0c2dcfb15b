//! Server-rendered page routes and the catch-all content fallback.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use vitrine_cms::{ApiEnvelope, CmsError, ContentItem, resolve_page_blocks};
use vitrine_http::{Handler, HttpResult, Request, Response, normalize_content_path};
use vitrine_pages::{
	PageShell, RenderContext, ThemeConfig, page_title, render_error_panel, render_not_found,
	render_page_body,
};

use crate::routes::{error_status, param, render_failure, tenant_header};
use crate::state::AppState;

/// Shell for this request: branding from the tenant header, theme from
/// the `clientId` header.
pub(crate) async fn page_shell(state: &AppState, request: &Request, title: &str) -> PageShell {
	let tenant = tenant_header(request);
	let branding = state.branding.resolve(tenant.as_deref()).await;
	let theme = ThemeConfig::from_client_id(request.header("clientId"));
	PageShell::new(title)
		.with_branding(branding)
		.with_theme(theme)
}

/// Render one CMS page into a complete HTML document.
async fn render_page(
	state: &AppState,
	request: &Request,
	page: &ContentItem,
) -> HttpResult<Response> {
	let blocks = resolve_page_blocks(page);
	let ctx = RenderContext::new(state.gateway.clone());
	let blocks_html = state.registry.render_blocks(&blocks, &ctx).await;
	let body = render_page_body(page, &blocks_html).map_err(render_failure)?;
	let shell = page_shell(state, request, &page_title(page)).await;
	let html = shell.render(&body).map_err(render_failure)?;
	Ok(Response::ok().with_html(html))
}

async fn not_found_page(state: &AppState, request: &Request, path: &str) -> HttpResult<Response> {
	let body = render_not_found(path).map_err(render_failure)?;
	let shell = page_shell(state, request, "Page not found").await;
	let html = shell.render(&body).map_err(render_failure)?;
	Ok(Response::not_found().with_html(html))
}

/// Gateway failure surfaced as an HTML diagnostic with the error's status.
async fn error_page(state: &AppState, request: &Request, error: &CmsError) -> HttpResult<Response> {
	let panel = render_error_panel(
		&error.to_string(),
		error.details().as_ref(),
		&BTreeMap::new(),
	)
	.map_err(render_failure)?;
	let shell = page_shell(state, request, "Something went wrong").await;
	let html = shell.render(&panel).map_err(render_failure)?;
	Ok(Response::new(error_status(error)).with_html(html))
}

/// `GET /` renders the page the CMS marks as the site start page.
pub struct HomepageHandler {
	state: Arc<AppState>,
}

impl HomepageHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for HomepageHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		match self.state.gateway.fetch_homepage().await {
			Ok(Some(page)) => render_page(&self.state, &request, &page).await,
			Ok(None) => not_found_page(&self.state, &request, "/").await,
			Err(e) => {
				warn!(error = %e, "homepage fetch failed");
				error_page(&self.state, &request, &e).await
			}
		}
	}
}

/// Router fallback: any unmatched path is looked up as a CMS content path.
///
/// Unmatched `/api/` paths stay JSON instead of turning into content
/// lookups.
pub struct PageHandler {
	state: Arc<AppState>,
}

impl PageHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for PageHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		if request.path().starts_with("/api/") {
			return Response::not_found().with_json(&ApiEnvelope::failure("Not found"));
		}

		let path = normalize_content_path(request.path());
		let locale = param(&request, "loc");

		match self
			.state
			.gateway
			.fetch_page_by_path(&path, locale.as_deref())
			.await
		{
			Ok(items) => match items.into_iter().next() {
				Some(page) => render_page(&self.state, &request, &page).await,
				None => not_found_page(&self.state, &request, &path).await,
			},
			Err(e) => {
				warn!(%path, error = %e, "page fetch failed");
				error_page(&self.state, &request, &e).await
			}
		}
	}
}
