use async_trait::async_trait;
use serde::Serialize;

use vitrine_cms::ResolvedBlock;

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct ImageView {
	src: String,
	alt: String,
	caption: String,
	edit_id: String,
}

/// Standalone figure. An image block without a source URL renders nothing
/// rather than a broken `<img>`.
pub struct ImageRenderer;

#[async_trait]
impl BlockRenderer for ImageRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let src = text_field(block, "ImageUrl");
		if src.is_empty() {
			return Ok(String::new());
		}

		let view = ImageView {
			src,
			alt: text_field(block, "AltText"),
			caption: text_field(block, "Caption"),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("image.html", &view)
	}
}
