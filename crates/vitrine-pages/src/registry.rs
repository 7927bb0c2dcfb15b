//! Render dispatch: content type tag to block renderer.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use vitrine_cms::ResolvedBlock;

use crate::blocks::BlockRenderer;
use crate::blocks::call_to_action::CallToActionRenderer;
use crate::blocks::carousel::CarouselRenderer;
use crate::blocks::content_block::ContentBlockRenderer;
use crate::blocks::demo_banner::DemoBannerRenderer;
use crate::blocks::feature_grid::FeatureGridRenderer;
use crate::blocks::hero::HeroRenderer;
use crate::blocks::image::ImageRenderer;
use crate::blocks::menu::MenuRenderer;
use crate::blocks::promo_block::PromoBlockRenderer;
use crate::blocks::text::TextRenderer;

use crate::context::RenderContext;

/// Closed map from type tag to renderer.
///
/// Unknown tags are not an error path: the upstream catalogue can grow
/// types this site does not render yet, so dispatch misses are logged and
/// the block is skipped.
pub struct BlockRegistry {
	renderers: HashMap<&'static str, Arc<dyn BlockRenderer>>,
}

impl BlockRegistry {
	pub fn new() -> Self {
		let mut renderers: HashMap<&'static str, Arc<dyn BlockRenderer>> = HashMap::new();

		renderers.insert("Hero", Arc::new(HeroRenderer));
		renderers.insert("Text", Arc::new(TextRenderer));
		renderers.insert("ContentBlock", Arc::new(ContentBlockRenderer));
		renderers.insert("Image", Arc::new(ImageRenderer));
		renderers.insert("Menu", Arc::new(MenuRenderer));
		renderers.insert("Carousel", Arc::new(CarouselRenderer));
		renderers.insert("FeatureGrid", Arc::new(FeatureGridRenderer));
		renderers.insert("PromoBlock", Arc::new(PromoBlockRenderer));
		renderers.insert("DemoBanner", Arc::new(DemoBannerRenderer));

		// The authored type and its generated output variant render
		// identically, so they share one renderer instance.
		let call_to_action: Arc<dyn BlockRenderer> = Arc::new(CallToActionRenderer);
		renderers.insert("CallToAction", Arc::clone(&call_to_action));
		renderers.insert("CallToActionOutput", call_to_action);

		Self { renderers }
	}

	/// The renderer for a type tag, if one is registered.
	pub fn resolve(&self, tag: &str) -> Option<&Arc<dyn BlockRenderer>> {
		self.renderers.get(tag)
	}

	pub fn known_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.renderers.keys().copied()
	}

	/// Render one block, or nothing.
	///
	/// Tagless blocks, unknown tags, renderer failures, and renderers that
	/// decline (empty output) all collapse to `None`; the page carries on
	/// without the block. Failures never take the whole page down.
	pub async fn render_block(
		&self,
		block: &ResolvedBlock,
		ctx: &RenderContext,
	) -> Option<String> {
		let Some(tag) = block.primary_type() else {
			warn!(key = ?block.key(), "block carries no type tag, skipping");
			return None;
		};
		let Some(renderer) = self.resolve(tag) else {
			warn!(%tag, key = ?block.key(), "no renderer for block type, skipping");
			return None;
		};

		match renderer.render(block, ctx).await {
			Ok(html) if html.is_empty() => None,
			Ok(html) => Some(html),
			Err(e) => {
				warn!(%tag, key = ?block.key(), error = %e, "block failed to render, skipping");
				None
			}
		}
	}

	/// Render a block list to one fragment, preserving document order.
	pub async fn render_blocks(&self, blocks: &[ResolvedBlock], ctx: &RenderContext) -> String {
		let mut fragments = Vec::with_capacity(blocks.len());
		for block in blocks {
			if let Some(html) = self.render_block(block, ctx).await {
				fragments.push(html);
			}
		}
		fragments.join("\n")
	}
}

impl Default for BlockRegistry {
	fn default() -> Self {
		Self::new()
	}
}
