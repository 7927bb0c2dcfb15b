use async_trait::async_trait;
use serde::Serialize;

use vitrine_cms::ResolvedBlock;

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct DemoBannerView {
	message: String,
	edit_id: String,
}

/// Single-line notice strip used on demo tenants.
pub struct DemoBannerRenderer;

#[async_trait]
impl BlockRenderer for DemoBannerRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let view = DemoBannerView {
			message: text_field(block, "Message"),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("demo_banner.html", &view)
	}
}
