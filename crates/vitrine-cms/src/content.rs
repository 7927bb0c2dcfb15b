use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical URL info attached to an item's metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUrl {
	#[serde(default)]
	pub default: Option<String>,
}

/// The `_metadata` block every CMS item carries.
///
/// `types` is ordered most-specific first; `types[0]` is the tag render
/// dispatch keys on. `version` is only populated for draft reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub version: Option<String>,
	#[serde(default)]
	pub locale: Option<String>,
	#[serde(default)]
	pub display_name: Option<String>,
	#[serde(default)]
	pub types: Vec<String>,
	#[serde(default)]
	pub url: Option<ItemUrl>,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub published: Option<DateTime<Utc>>,
}

impl ItemMetadata {
	/// First (most specific) declared type tag.
	pub fn primary_type(&self) -> Option<&str> {
		self.types.first().map(|s| s.as_str())
	}
}

/// A CMS record: typed metadata plus whatever block fields the query
/// selected (Heading, Body, image URLs, ...), preserved untyped so
/// renderers can pick what they consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
	#[serde(rename = "_metadata", default)]
	pub metadata: ItemMetadata,
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}

impl ContentItem {
	/// Tag used for render dispatch.
	pub fn primary_type(&self) -> Option<&str> {
		self.metadata.primary_type()
	}

	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// A block field as a string, when present and actually a string.
	pub fn field_str(&self, name: &str) -> Option<&str> {
		self.fields.get(name).and_then(Value::as_str)
	}
}

/// A block flattened out of a page, ready for render dispatch.
///
/// The provenance fields (`_isShared`, `_elementKey`,
/// `_elementDisplayName`) exist for diagnostics and stable render keys
/// only; no rendering decision may depend on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedBlock {
	#[serde(flatten)]
	pub item: ContentItem,
	#[serde(rename = "_isShared", default)]
	pub is_shared: bool,
	#[serde(rename = "_elementKey", default)]
	pub element_key: Option<String>,
	#[serde(rename = "_elementDisplayName", default)]
	pub element_display_name: Option<String>,
}

impl ResolvedBlock {
	/// Tag used for render dispatch.
	pub fn primary_type(&self) -> Option<&str> {
		self.item.primary_type()
	}

	/// The block's own CMS key, used for the edit-mode DOM attribute.
	pub fn key(&self) -> Option<&str> {
		self.item.metadata.key.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_content_item_keeps_unknown_fields() {
		let item: ContentItem = serde_json::from_value(json!({
			"_metadata": {
				"key": "abc123",
				"types": ["Hero", "_Component"],
				"displayName": "Front hero"
			},
			"Heading": "Welcome",
			"SubHeading": "To the site"
		}))
		.unwrap();

		assert_eq!(item.primary_type(), Some("Hero"));
		assert_eq!(item.metadata.display_name.as_deref(), Some("Front hero"));
		assert_eq!(item.field_str("Heading"), Some("Welcome"));
		assert_eq!(item.field_str("SubHeading"), Some("To the site"));
		assert_eq!(item.field("Missing"), None);
	}

	#[rstest]
	fn test_metadata_tolerates_sparse_payloads() {
		let item: ContentItem = serde_json::from_value(json!({
			"_metadata": {}
		}))
		.unwrap();

		assert_eq!(item.primary_type(), None);
		assert!(item.metadata.published.is_none());
	}

	#[rstest]
	fn test_metadata_parses_published_timestamp() {
		let item: ContentItem = serde_json::from_value(json!({
			"_metadata": {
				"key": "a",
				"published": "2024-06-01T10:30:00Z",
				"url": {"default": "/news/launch/"},
				"status": "Published"
			}
		}))
		.unwrap();

		let published = item.metadata.published.unwrap();
		assert_eq!(published.to_rfc3339(), "2024-06-01T10:30:00+00:00");
		assert_eq!(
			item.metadata.url.unwrap().default.as_deref(),
			Some("/news/launch/")
		);
	}

	#[rstest]
	fn test_resolved_block_serializes_provenance_names() {
		let block = ResolvedBlock {
			item: serde_json::from_value(json!({
				"_metadata": {"key": "k1", "types": ["Text"]},
				"Body": "<p>hi</p>"
			}))
			.unwrap(),
			is_shared: true,
			element_key: Some("el-9".to_string()),
			element_display_name: Some("Body text".to_string()),
		};

		let value = serde_json::to_value(&block).unwrap();
		assert_eq!(value["_isShared"], json!(true));
		assert_eq!(value["_elementKey"], json!("el-9"));
		assert_eq!(value["_elementDisplayName"], json!("Body text"));
		assert_eq!(value["Body"], json!("<p>hi</p>"));
		assert_eq!(value["_metadata"]["key"], json!("k1"));
	}
}
