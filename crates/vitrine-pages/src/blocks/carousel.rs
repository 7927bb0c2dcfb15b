use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use vitrine_cms::{ContentItem, ResolvedBlock};

use crate::blocks::{BlockRenderer, edit_id, referenced_keys, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct SlideView {
	image: String,
	heading: String,
	body: String,
}

#[derive(Serialize)]
struct CarouselView {
	heading: String,
	slides: Vec<SlideView>,
	edit_id: String,
}

/// Rotating gallery whose slides are references to other blocks.
///
/// Slides are hydrated through the gateway in a second round of fetches.
/// A carousel where every slide failed to hydrate renders nothing at all;
/// an empty shell would just be dead chrome.
pub struct CarouselRenderer;

impl CarouselRenderer {
	fn slide_view(item: &ContentItem) -> SlideView {
		SlideView {
			image: item.field_str("ImageUrl").unwrap_or_default().to_string(),
			heading: item.field_str("Heading").unwrap_or_default().to_string(),
			body: item.field_str("Body").unwrap_or_default().to_string(),
		}
	}
}

#[async_trait]
impl BlockRenderer for CarouselRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let keys = referenced_keys(block.item.field("Slides"));
		let hydrated = ctx.gateway.fetch_blocks_by_keys(&keys).await;
		if hydrated.is_empty() {
			debug!(
				referenced = keys.len(),
				"carousel has no hydrated slides, skipping"
			);
			return Ok(String::new());
		}

		let view = CarouselView {
			heading: text_field(block, "Heading"),
			slides: hydrated.iter().map(Self::slide_view).collect(),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("carousel.html", &view)
	}
}
