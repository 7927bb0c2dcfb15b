use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use vitrine_cms::{ContentItem, ResolvedBlock};

use crate::blocks::{BlockRenderer, edit_id, referenced_keys, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct CardView {
	heading: String,
	body: String,
	icon: String,
	link_url: String,
	link_label: String,
}

#[derive(Serialize)]
struct FeatureGridView {
	heading: String,
	cards: Vec<CardView>,
	edit_id: String,
}

/// Grid of feature cards referenced by key and hydrated on render.
///
/// Same skip rule as the carousel: when no referenced card survives
/// hydration the grid contributes no markup.
pub struct FeatureGridRenderer;

impl FeatureGridRenderer {
	fn card_view(item: &ContentItem) -> CardView {
		let link_url = item.field_str("LinkUrl").unwrap_or_default().to_string();
		let link_label = match item.field_str("LinkLabel") {
			Some(label) if !label.is_empty() => label.to_string(),
			_ => "Learn more".to_string(),
		};
		CardView {
			heading: item.field_str("Heading").unwrap_or_default().to_string(),
			body: item.field_str("Body").unwrap_or_default().to_string(),
			icon: item.field_str("IconUrl").unwrap_or_default().to_string(),
			link_url,
			link_label,
		}
	}
}

#[async_trait]
impl BlockRenderer for FeatureGridRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let keys = referenced_keys(block.item.field("Cards"));
		let hydrated = ctx.gateway.fetch_feature_cards_by_keys(&keys).await;
		if hydrated.is_empty() {
			debug!(
				referenced = keys.len(),
				"feature grid has no hydrated cards, skipping"
			);
			return Ok(String::new());
		}

		let view = FeatureGridView {
			heading: text_field(block, "Heading"),
			cards: hydrated.iter().map(Self::card_view).collect(),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("feature_grid.html", &view)
	}
}
