//! Server-side rendering for the site: the template engine, one renderer
//! per content block type, the registry that dispatches on type tags, and
//! the branding, preview, and page-shell assembly around them.
//!
//! Renderers consume the flattened blocks produced by `vitrine-cms` and
//! emit HTML fragments; nothing here speaks HTTP.

pub mod blocks;
pub mod branding;
pub mod context;
pub mod engine;
pub mod error;
pub mod preview;
pub mod registry;
pub mod shell;

pub use blocks::BlockRenderer;
pub use branding::{BRANDING_ASSETS, BrandingConfig, BrandingResolver, ThemeConfig};
pub use context::{ContextMode, RenderContext};
pub use error::{PagesError, PagesResult};
pub use preview::{
	BRIDGE_SCRIPT_ROUTE, BridgeConfig, PREVIEW_BRIDGE_JS, PreviewParams, render_error_panel,
	render_missing_key_page, render_preview_shell,
};
pub use registry::BlockRegistry;
pub use shell::{PageShell, page_title, render_not_found, render_page_body};

/// Site stylesheet, served at `/assets/site.css`.
pub static SITE_CSS: &str = include_str!("../assets/site.css");
