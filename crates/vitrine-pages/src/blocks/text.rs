use async_trait::async_trait;
use serde::Serialize;

use vitrine_cms::ResolvedBlock;

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct TextView {
	body: String,
	edit_id: String,
}

/// Plain rich-text body.
pub struct TextRenderer;

#[async_trait]
impl BlockRenderer for TextRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let view = TextView {
			body: text_field(block, "Body"),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("text.html", &view)
	}
}
