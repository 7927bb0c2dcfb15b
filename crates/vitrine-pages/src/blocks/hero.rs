use async_trait::async_trait;
use serde::Serialize;

use vitrine_cms::ResolvedBlock;

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct HeroView {
	heading: String,
	subheading: String,
	background: String,
	cta_label: String,
	cta_url: String,
	edit_id: String,
}

/// Full-width banner with an optional background image and call to action.
pub struct HeroRenderer;

#[async_trait]
impl BlockRenderer for HeroRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let view = HeroView {
			heading: text_field(block, "Heading"),
			subheading: text_field(block, "SubHeading"),
			background: text_field(block, "BackgroundImageUrl"),
			cta_label: text_field(block, "CallToActionLabel"),
			cta_url: text_field(block, "CallToActionUrl"),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("hero.html", &view)
	}
}
