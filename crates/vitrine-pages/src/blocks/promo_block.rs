use async_trait::async_trait;
use serde::Serialize;

use vitrine_cms::ResolvedBlock;

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct PromoBlockView {
	heading: String,
	body: String,
	image: String,
	link_url: String,
	link_label: String,
	edit_id: String,
}

/// Promotional banner with an optional image and outbound link.
pub struct PromoBlockRenderer;

#[async_trait]
impl BlockRenderer for PromoBlockRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let link_url = text_field(block, "LinkUrl");
		let mut link_label = text_field(block, "LinkLabel");
		if link_label.is_empty() {
			link_label = link_url.clone();
		}

		let view = PromoBlockView {
			heading: text_field(block, "Heading"),
			body: text_field(block, "Body"),
			image: text_field(block, "ImageUrl"),
			link_url,
			link_label,
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("promo_block.html", &view)
	}
}
