//! Rendering context shared by all block renderers.

use std::sync::Arc;

use vitrine_cms::CmsGateway;

/// How the CMS editor asked for the content to be rendered.
///
/// `Edit` mode decorates each block with the DOM attribute the editor
/// overlay uses to locate blocks on the page. `View` mode renders plain
/// markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextMode {
	#[default]
	View,
	Edit,
}

impl ContextMode {
	/// Parses the `ctx` query parameter. Only the literal `edit` selects
	/// edit mode; anything else, including absence, is view mode.
	pub fn from_query(value: Option<&str>) -> Self {
		match value {
			Some("edit") => Self::Edit,
			_ => Self::View,
		}
	}

	pub fn is_edit(&self) -> bool {
		matches!(self, Self::Edit)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::View => "view",
			Self::Edit => "edit",
		}
	}
}

/// Everything a block renderer may need beyond the block itself.
///
/// The gateway is carried here so composite blocks can hydrate their
/// referenced children during rendering.
#[derive(Clone)]
pub struct RenderContext {
	pub mode: ContextMode,
	pub is_preview: bool,
	pub gateway: Arc<CmsGateway>,
}

impl RenderContext {
	pub fn new(gateway: Arc<CmsGateway>) -> Self {
		Self {
			mode: ContextMode::View,
			is_preview: false,
			gateway,
		}
	}

	pub fn with_mode(mut self, mode: ContextMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn with_preview(mut self, is_preview: bool) -> Self {
		self.is_preview = is_preview;
		self
	}
}
