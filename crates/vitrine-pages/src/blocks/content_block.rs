use async_trait::async_trait;
use serde::Serialize;

use vitrine_cms::ResolvedBlock;

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct ContentBlockView {
	heading: String,
	body: String,
	image: String,
	edit_id: String,
}

/// General-purpose heading/body/image section.
pub struct ContentBlockRenderer;

#[async_trait]
impl BlockRenderer for ContentBlockRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let view = ContentBlockView {
			heading: text_field(block, "Heading"),
			body: text_field(block, "Body"),
			image: text_field(block, "ImageUrl"),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("content_block.html", &view)
	}
}
