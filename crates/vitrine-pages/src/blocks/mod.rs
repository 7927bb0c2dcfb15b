//! Block renderers, one per content type tag.
//!
//! Each renderer extracts a flat string view model from the block's
//! untyped fields and feeds it to its template. Missing fields become
//! empty strings, and every template suppresses the markup of an empty
//! field, so renderers never special-case absence.

use async_trait::async_trait;
use serde_json::Value;

use vitrine_cms::{NodeSet, ResolvedBlock};

use crate::context::RenderContext;
use crate::error::PagesResult;

pub mod call_to_action;
pub mod carousel;
pub mod content_block;
pub mod demo_banner;
pub mod feature_grid;
pub mod hero;
pub mod image;
pub mod menu;
pub mod promo_block;
pub mod text;

/// Renders one resolved block to an HTML fragment.
///
/// Composite renderers hydrate referenced children through the context's
/// gateway, which is why rendering is async.
#[async_trait]
pub trait BlockRenderer: Send + Sync {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String>;
}

/// A block field as an owned string, empty when absent or not a string.
pub(crate) fn text_field(block: &ResolvedBlock, name: &str) -> String {
	block.item.field_str(name).unwrap_or_default().to_string()
}

/// The value for the editor's block-locator DOM attribute.
///
/// Empty outside edit mode, and empty for blocks without a CMS key, which
/// suppresses the attribute entirely in the templates.
pub(crate) fn edit_id(block: &ResolvedBlock, ctx: &RenderContext) -> String {
	if ctx.mode.is_edit() {
		block.key().unwrap_or_default().to_string()
	} else {
		String::new()
	}
}

/// Keys of the items a reference-list field points at.
///
/// The list tolerates both upstream shapes (plain array and node wrapper),
/// and each entry may carry its key at the top level or under `_metadata`.
/// Entries without a key are skipped.
pub(crate) fn referenced_keys(field: Option<&Value>) -> Vec<String> {
	let Some(field) = field else {
		return Vec::new();
	};
	let set: NodeSet<Value> = serde_json::from_value(field.clone()).unwrap_or_default();
	set.items()
		.iter()
		.filter_map(|entry| {
			entry
				.get("key")
				.or_else(|| entry.pointer("/_metadata/key"))
				.and_then(Value::as_str)
				.map(str::to_string)
		})
		.collect()
}
