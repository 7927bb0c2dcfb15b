//! Page shell assembly: wraps rendered fragments in the base layout.

use serde::Serialize;

use vitrine_cms::ContentItem;

use crate::branding::{BrandingConfig, ThemeConfig};
use crate::engine;
use crate::error::PagesResult;

pub const DEFAULT_TITLE: &str = "Vitrine";

#[derive(Serialize)]
struct BaseView {
	title: String,
	favicon: String,
	head_extra: String,
	theme: String,
	customer: String,
	header_image: String,
	footer_image: String,
	content: String,
}

/// Outer layout for one response: title plus the request's branding and
/// theme state.
#[derive(Debug, Clone, Default)]
pub struct PageShell {
	pub title: String,
	pub branding: BrandingConfig,
	pub theme: ThemeConfig,
}

impl PageShell {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			..Self::default()
		}
	}

	pub fn with_branding(mut self, branding: BrandingConfig) -> Self {
		self.branding = branding;
		self
	}

	pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
		self.theme = theme;
		self
	}

	/// Renders the full HTML document around an already-rendered body.
	pub fn render(&self, content_html: &str) -> PagesResult<String> {
		let view = BaseView {
			title: self.title.clone(),
			favicon: self.branding.favicon.clone(),
			head_extra: String::new(),
			theme: self.theme.body_class().to_string(),
			customer: self.branding.customer.clone(),
			header_image: self.branding.header_image.clone(),
			footer_image: self.branding.footer_image.clone(),
			content: content_html.to_string(),
		};
		engine::render_with("base.html", &view)
	}
}

#[derive(Serialize)]
struct PageView {
	heading: String,
	subheading: String,
	author: String,
	body: String,
	blocks_html: String,
}

/// Title shown in the tab: display name first, heading second.
pub fn page_title(page: &ContentItem) -> String {
	if let Some(name) = page.metadata.display_name.as_deref()
		&& !name.is_empty()
	{
		return name.to_string();
	}
	match page.field_str("Heading") {
		Some(heading) if !heading.is_empty() => heading.to_string(),
		_ => DEFAULT_TITLE.to_string(),
	}
}

/// Renders a page's own fields plus its already-rendered block list.
pub fn render_page_body(page: &ContentItem, blocks_html: &str) -> PagesResult<String> {
	let view = PageView {
		heading: page.field_str("Heading").unwrap_or_default().to_string(),
		subheading: page.field_str("SubHeading").unwrap_or_default().to_string(),
		author: page.field_str("Author").unwrap_or_default().to_string(),
		body: page.field_str("Body").unwrap_or_default().to_string(),
		blocks_html: blocks_html.to_string(),
	};
	engine::render_with("page.html", &view)
}

#[derive(Serialize)]
struct NotFoundView {
	path: String,
}

/// The HTML not-found page for unmatched content paths.
pub fn render_not_found(path: &str) -> PagesResult<String> {
	engine::render_with("not_found.html", &NotFoundView {
		path: path.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn article() -> ContentItem {
		serde_json::from_value(json!({
			"_metadata": {
				"key": "a1",
				"types": ["ArticlePage", "_Page"],
				"displayName": "Launch day"
			},
			"Heading": "We launched",
			"SubHeading": "Finally",
			"Author": "Sam",
			"Body": "It took a while."
		}))
		.unwrap()
	}

	#[test]
	fn shell_wraps_content_with_branding_and_theme() {
		let branding = BrandingConfig {
			customer: "acme".to_string(),
			has_custom_branding: true,
			header_image: "/branding/acme/header.png".to_string(),
			footer_image: String::new(),
			favicon: "/branding/acme/favicon.ico".to_string(),
		};
		let shell = PageShell::new("Acme")
			.with_branding(branding)
			.with_theme(ThemeConfig { test_theme: true });

		let html = shell.render("<p>inner</p>").unwrap();

		assert!(html.contains("<title>Acme</title>"));
		assert!(html.contains("class=\"site theme-test\""));
		assert!(html.contains("src=\"/branding/acme/header.png\""));
		assert!(html.contains("href=\"/branding/acme/favicon.ico\""));
		assert!(html.contains("<p>inner</p>"));
		assert!(!html.contains("branding-footer"));
	}

	#[test]
	fn bare_shell_renders_without_branding_markup() {
		let html = PageShell::new("Plain").render("<p>x</p>").unwrap();

		assert!(html.contains("class=\"site\""));
		assert!(!html.contains("branding-header"));
		assert!(!html.contains("rel=\"icon\""));
	}

	#[test]
	fn page_body_renders_fields_and_blocks() {
		let html = render_page_body(&article(), "<div class=\"hero\">h</div>").unwrap();

		assert!(html.contains("We launched"));
		assert!(html.contains("Finally"));
		assert!(html.contains("By Sam"));
		assert!(html.contains("It took a while."));
		assert!(html.contains("<div class=\"hero\">h</div>"));
	}

	#[test]
	fn title_prefers_display_name_then_heading() {
		assert_eq!(page_title(&article()), "Launch day");

		let no_name: ContentItem = serde_json::from_value(json!({
			"_metadata": {"types": ["ArticlePage"]},
			"Heading": "We launched"
		}))
		.unwrap();
		assert_eq!(page_title(&no_name), "We launched");

		let bare: ContentItem = serde_json::from_value(json!({
			"_metadata": {}
		}))
		.unwrap();
		assert_eq!(page_title(&bare), DEFAULT_TITLE);
	}

	#[test]
	fn not_found_page_names_the_path() {
		let html = render_not_found("/missing/page/").unwrap();

		assert!(html.contains("Page not found"));
		assert!(html.contains("<code>/missing/page/</code>"));
	}
}
