//! Route table and server assembly.

use std::sync::Arc;

use hyper::Method;

use vitrine_http::Handler;
use vitrine_server::{HttpServer, RequestLogMiddleware, Route, Router};

use crate::routes::api::{
	ApiBlockHandler, ApiBlocksHandler, ApiCardHandler, ApiFeatureCardHandler, ApiHomepageHandler,
	ApiMenuHandler, ApiNewsArticlesHandler, ApiPageHandler, ApiPageInstancesHandler,
	ApiPageTypesHandler, HealthHandler, PreviewContentHandler,
};
use crate::routes::branding::{
	AssetsHandler, BrandingAssetHandler, BrandingEchoHandler, ThemeEchoHandler,
};
use crate::routes::pages::{HomepageHandler, PageHandler};
use crate::routes::preview::PreviewPageHandler;
use crate::state::AppState;

/// The content API wrappers accept GET and POST interchangeably.
fn get_or_post(path: &str, handler: Arc<dyn Handler>) -> Route {
	Route::get(path, handler).with_method(Method::POST)
}

/// The full route table over shared state.
///
/// Anything the table does not claim falls through to the content-path
/// handler, which is what makes arbitrary CMS page URLs work.
pub fn build_router(state: Arc<AppState>) -> Router {
	Router::new()
		.with_route(Route::get(
			"/",
			Arc::new(HomepageHandler::new(state.clone())),
		))
		.with_route(Route::get("/health", Arc::new(HealthHandler)))
		.with_route(Route::get(
			"/preview",
			Arc::new(PreviewPageHandler::new(state.clone())),
		))
		.with_route(Route::get(
			"/api/optimizely/page",
			Arc::new(ApiPageHandler::new(state.clone())),
		))
		.with_route(Route::get(
			"/api/optimizely/homepage",
			Arc::new(ApiHomepageHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/block",
			Arc::new(ApiBlockHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/card",
			Arc::new(ApiCardHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/feature-card",
			Arc::new(ApiFeatureCardHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/news-articles",
			Arc::new(ApiNewsArticlesHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/page-types",
			Arc::new(ApiPageTypesHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/page-instances",
			Arc::new(ApiPageInstancesHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/blocks",
			Arc::new(ApiBlocksHandler::new(state.clone())),
		))
		.with_route(get_or_post(
			"/api/optimizely/menu",
			Arc::new(ApiMenuHandler::new(state.clone())),
		))
		.with_route(Route::post(
			"/api/optimizely/preview-content",
			Arc::new(PreviewContentHandler::new(state.clone())),
		))
		.with_route(Route::get(
			"/api/branding",
			Arc::new(BrandingEchoHandler::new(state.clone())),
		))
		.with_route(Route::get("/api/theme", Arc::new(ThemeEchoHandler)))
		.with_route(Route::get(
			"/branding/{tenant}/{asset}",
			Arc::new(BrandingAssetHandler::new(state.clone())),
		))
		.with_route(Route::get("/assets/*path", Arc::new(AssetsHandler)))
		.with_fallback(Arc::new(PageHandler::new(state)))
}

/// The server with the standard middleware stack.
pub fn build_app(state: Arc<AppState>) -> HttpServer {
	HttpServer::new(Arc::new(build_router(state)))
		.with_middleware(Arc::new(RequestLogMiddleware::new()))
}
