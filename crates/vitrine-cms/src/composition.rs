use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{ContentItem, ResolvedBlock};

/// A collection that tolerates every upstream list shape.
///
/// Depending on which query variant produced the response, a collection
/// arrives as a plain array (`"rows": [...]`), as an aliased node wrapper
/// (`"rows": {"nodes": [...]}`), or as GraphQL null. All three deserialize;
/// the latter two normalize to the same slice view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSet<T> {
	Plain(Vec<T>),
	Wrapped {
		#[serde(default)]
		nodes: Option<Vec<T>>,
	},
	Null,
}

impl<T> NodeSet<T> {
	pub fn items(&self) -> &[T] {
		match self {
			NodeSet::Plain(items) => items,
			NodeSet::Wrapped { nodes } => nodes.as_deref().unwrap_or(&[]),
			NodeSet::Null => &[],
		}
	}

	pub fn is_empty(&self) -> bool {
		self.items().is_empty()
	}

	pub fn len(&self) -> usize {
		self.items().len()
	}
}

impl<T> Default for NodeSet<T> {
	fn default() -> Self {
		NodeSet::Plain(Vec::new())
	}
}

/// Layout tree root found under a page's `composition` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Composition {
	#[serde(default)]
	pub grids: NodeSet<Grid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub rows: NodeSet<Row>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub columns: NodeSet<Column>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub elements: NodeSet<Element>,
}

/// Leaf slot of the layout tree.
///
/// Exactly one of `component` (inline block) or `element` (reference to a
/// shared block) is populated; a slot with neither is empty and contributes
/// nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Element {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(rename = "displayName", default)]
	pub display_name: Option<String>,
	#[serde(default)]
	pub component: Option<ContentItem>,
	#[serde(default)]
	pub element: Option<ContentItem>,
}

/// Flatten a composition tree into renderable blocks.
///
/// Single pass in document order: grid, then row, then column, then
/// element. A missing or empty collection at any level simply ends that
/// branch.
pub fn resolve_composition(composition: &Composition) -> Vec<ResolvedBlock> {
	let mut blocks = Vec::new();
	for grid in composition.grids.items() {
		for row in grid.rows.items() {
			for column in row.columns.items() {
				for element in column.elements.items() {
					if let Some(block) = resolve_element(element) {
						blocks.push(block);
					}
				}
			}
		}
	}
	blocks
}

fn resolve_element(element: &Element) -> Option<ResolvedBlock> {
	if let Some(component) = &element.component {
		return Some(ResolvedBlock {
			is_shared: component.metadata.key.is_some(),
			element_key: element.key.clone(),
			element_display_name: element.display_name.clone(),
			item: component.clone(),
		});
	}
	if let Some(shared) = &element.element {
		return Some(ResolvedBlock {
			is_shared: true,
			element_key: element.key.clone(),
			element_display_name: element.display_name.clone(),
			item: shared.clone(),
		});
	}
	// Empty slot: neither an inline component nor a shared reference
	None
}

/// Blocks from a named content-area field.
///
/// Entries are already ContentItem-shaped, so the array is the block list;
/// only the provenance stamp is added so both traversal modes produce the
/// same shape.
pub fn resolve_content_area(items: &[ContentItem]) -> Vec<ResolvedBlock> {
	items
		.iter()
		.map(|item| ResolvedBlock {
			is_shared: item.metadata.key.is_some(),
			element_key: item.metadata.key.clone(),
			element_display_name: item.metadata.display_name.clone(),
			item: item.clone(),
		})
		.collect()
}

/// Named content-area fields checked on pages without a composition tree,
/// in render order.
const CONTENT_AREA_FIELDS: [&str; 2] = ["TopContentArea", "MainContentArea"];

/// Every block a page contributes, whichever layout mode it uses.
///
/// Pages built in the visual editor carry a `composition` tree; classic
/// pages expose named content-area fields instead. Both paths yield
/// identically shaped [`ResolvedBlock`]s.
pub fn resolve_page_blocks(page: &ContentItem) -> Vec<ResolvedBlock> {
	if let Some(value) = page.field("composition") {
		match serde_json::from_value::<Composition>(value.clone()) {
			Ok(composition) => return resolve_composition(&composition),
			Err(e) => {
				debug!(error = %e, "composition field did not parse, falling back to content areas");
			}
		}
	}

	let mut blocks = Vec::new();
	for area in CONTENT_AREA_FIELDS {
		if let Some(value) = page.field(area)
			&& let Ok(items) = serde_json::from_value::<NodeSet<ContentItem>>(value.clone())
		{
			blocks.extend(resolve_content_area(items.items()));
		}
	}
	blocks
}
