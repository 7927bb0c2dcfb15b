//! JSON API: thin parameterized wrappers around the gateway operations.
//!
//! Every handler answers the uniform envelope; statuses follow
//! `CmsError::status_code`. The GET and POST variants of a route read the
//! same parameter names from the query string or the JSON body.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use vitrine_cms::{CmsError, CmsResult, ContentItem, PageEnvelope, PreviewRequest};
use vitrine_http::{Handler, HttpError, HttpResult, Request, Response, normalize_content_path};

use crate::routes::{api_failure, api_success, error_status, missing_param, param};
use crate::state::AppState;

/// One optional item: found, not found (404), or failed.
fn item_response(result: CmsResult<Option<ContentItem>>, kind: &str) -> HttpResult<Response> {
	match result {
		Ok(Some(item)) => api_success(&item),
		Ok(None) => api_failure(&CmsError::NotFound(kind.to_string())),
		Err(e) => {
			warn!(kind, error = %e, "content fetch failed");
			api_failure(&e)
		}
	}
}

/// A list result: an empty list is a success, not a 404.
fn list_response<T: Serialize>(result: CmsResult<Vec<T>>, kind: &str) -> HttpResult<Response> {
	match result {
		Ok(items) => api_success(&items),
		Err(e) => {
			warn!(kind, error = %e, "content fetch failed");
			api_failure(&e)
		}
	}
}

/// `GET /api/optimizely/page?path=...` with the page-specific envelope.
pub struct ApiPageHandler {
	state: Arc<AppState>,
}

impl ApiPageHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiPageHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let path = normalize_content_path(&param(&request, "path").unwrap_or_default());
		let locale = param(&request, "loc");

		match self
			.state
			.gateway
			.fetch_page_by_path(&path, locale.as_deref())
			.await
		{
			Ok(items) => {
				let count = items.len();
				match items.into_iter().next() {
					Some(item) => {
						let value = serde_json::to_value(&item)
							.map_err(|e| HttpError::Serialization(e.to_string()))?;
						Response::ok().with_json(&PageEnvelope::success(value, &path, count))
					}
					None => {
						let error = CmsError::NotFound("Page".to_string());
						Response::new(error_status(&error))
							.with_json(&PageEnvelope::failure(&error, &path))
					}
				}
			}
			Err(e) => {
				warn!(%path, error = %e, "page lookup failed");
				Response::new(error_status(&e)).with_json(&PageEnvelope::failure(&e, &path))
			}
		}
	}
}

/// `GET /api/optimizely/homepage`
pub struct ApiHomepageHandler {
	state: Arc<AppState>,
}

impl ApiHomepageHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiHomepageHandler {
	async fn handle(&self, _request: Request) -> HttpResult<Response> {
		item_response(self.state.gateway.fetch_homepage().await, "Homepage")
	}
}

/// `GET|POST /api/optimizely/block` (`key`, optional `loc`)
pub struct ApiBlockHandler {
	state: Arc<AppState>,
}

impl ApiBlockHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiBlockHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let Some(key) = param(&request, "key") else {
			return missing_param("key");
		};
		let locale = param(&request, "loc");

		item_response(
			self.state.gateway.fetch_block(&key, locale.as_deref()).await,
			"Block",
		)
	}
}

/// `GET|POST /api/optimizely/card` (`key`)
pub struct ApiCardHandler {
	state: Arc<AppState>,
}

impl ApiCardHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiCardHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let Some(key) = param(&request, "key") else {
			return missing_param("key");
		};

		item_response(self.state.gateway.fetch_card(&key).await, "Card")
	}
}

/// `GET|POST /api/optimizely/feature-card` (`key`)
pub struct ApiFeatureCardHandler {
	state: Arc<AppState>,
}

impl ApiFeatureCardHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiFeatureCardHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let Some(key) = param(&request, "key") else {
			return missing_param("key");
		};

		item_response(
			self.state.gateway.fetch_feature_card(&key).await,
			"Feature card",
		)
	}
}

/// `GET|POST /api/optimizely/news-articles` (optional `limit`)
pub struct ApiNewsArticlesHandler {
	state: Arc<AppState>,
}

impl ApiNewsArticlesHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiNewsArticlesHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		// An unparseable limit is treated as absent, not rejected
		let limit = param(&request, "limit").and_then(|v| v.parse::<u32>().ok());

		list_response(
			self.state.gateway.fetch_news_articles(limit).await,
			"News articles",
		)
	}
}

/// `GET|POST /api/optimizely/page-types`
pub struct ApiPageTypesHandler {
	state: Arc<AppState>,
}

impl ApiPageTypesHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiPageTypesHandler {
	async fn handle(&self, _request: Request) -> HttpResult<Response> {
		list_response(self.state.gateway.fetch_page_types().await, "Page types")
	}
}

/// `GET|POST /api/optimizely/page-instances` (`type`)
pub struct ApiPageInstancesHandler {
	state: Arc<AppState>,
}

impl ApiPageInstancesHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiPageInstancesHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let Some(page_type) = param(&request, "type") else {
			return missing_param("type");
		};

		list_response(
			self.state.gateway.fetch_page_instances(&page_type).await,
			"Page instances",
		)
	}
}

/// `GET|POST /api/optimizely/blocks`
pub struct ApiBlocksHandler {
	state: Arc<AppState>,
}

impl ApiBlocksHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiBlocksHandler {
	async fn handle(&self, _request: Request) -> HttpResult<Response> {
		list_response(self.state.gateway.fetch_blocks().await, "Blocks")
	}
}

/// `GET|POST /api/optimizely/menu` (optional `name`)
pub struct ApiMenuHandler {
	state: Arc<AppState>,
}

impl ApiMenuHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ApiMenuHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let name = param(&request, "name");

		item_response(
			self.state.gateway.fetch_menu(name.as_deref()).await,
			"Menu",
		)
	}
}

/// `POST /api/optimizely/preview-content` body `{key, ver, loc}`.
///
/// Runs in token mode when the request carries a bearer token, key mode
/// otherwise; the two never combine.
pub struct PreviewContentHandler {
	state: Arc<AppState>,
}

impl PreviewContentHandler {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for PreviewContentHandler {
	async fn handle(&self, request: Request) -> HttpResult<Response> {
		let Some(key) = param(&request, "key") else {
			return missing_param("key");
		};

		let preview = PreviewRequest {
			key,
			version: param(&request, "ver"),
			locale: param(&request, "loc"),
			preview_token: request.bearer_token(),
		};

		item_response(
			self.state.gateway.fetch_preview_content(&preview).await,
			"Preview content",
		)
	}
}

/// `GET /health` for deploy probes.
pub struct HealthHandler;

#[async_trait]
impl Handler for HealthHandler {
	async fn handle(&self, _request: Request) -> HttpResult<Response> {
		api_success(&"ok")
	}
}
