use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use vitrine_cms::{NodeSet, ResolvedBlock};

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct MenuItemView {
	label: String,
	url: String,
}

#[derive(Serialize)]
struct MenuView {
	heading: String,
	items: Vec<MenuItemView>,
	edit_id: String,
}

/// Navigation list. Items without a URL keep their label and link to `#`,
/// matching how editors stub out entries before the target page exists.
pub struct MenuRenderer;

impl MenuRenderer {
	fn items(block: &ResolvedBlock) -> Vec<MenuItemView> {
		let Some(raw) = block.item.field("MenuItems") else {
			return Vec::new();
		};
		let set: NodeSet<Value> = serde_json::from_value(raw.clone()).unwrap_or_default();
		set.items()
			.iter()
			.filter_map(|entry| {
				let label = entry.get("Label").and_then(Value::as_str)?;
				let url = entry
					.get("Url")
					.and_then(Value::as_str)
					.unwrap_or("#");
				Some(MenuItemView {
					label: label.to_string(),
					url: url.to_string(),
				})
			})
			.collect()
	}
}

#[async_trait]
impl BlockRenderer for MenuRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let view = MenuView {
			heading: text_field(block, "Heading"),
			items: Self::items(block),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("menu.html", &view)
	}
}
