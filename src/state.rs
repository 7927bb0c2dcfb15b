//! Process-wide state shared by every route handler.

use std::sync::Arc;

use vitrine_cms::{CmsConfig, CmsGateway, HttpTransport};
use vitrine_pages::{BlockRegistry, BrandingResolver};

use crate::config::Settings;

/// Read-only handles built once at startup and cloned into handlers.
pub struct AppState {
	pub settings: Settings,
	pub gateway: Arc<CmsGateway>,
	pub registry: Arc<BlockRegistry>,
	pub branding: Arc<BrandingResolver>,
}

impl AppState {
	/// Wire the production transport from settings.
	pub fn from_settings(settings: Settings) -> Self {
		let mut config = CmsConfig::new(settings.graphql_url.clone());
		if let Some(key) = &settings.app_key {
			config = config.with_app_key(key.clone());
		}
		let gateway = CmsGateway::new(Arc::new(HttpTransport::new(config)));
		Self::with_gateway(settings, Arc::new(gateway))
	}

	/// Wire an explicit gateway; tests substitute a canned transport here.
	pub fn with_gateway(settings: Settings, gateway: Arc<CmsGateway>) -> Self {
		let branding = BrandingResolver::new(settings.public_dir.clone());
		Self {
			settings,
			gateway,
			registry: Arc::new(BlockRegistry::new()),
			branding: Arc::new(branding),
		}
	}
}
