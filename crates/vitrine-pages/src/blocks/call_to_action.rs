use async_trait::async_trait;
use serde::Serialize;

use vitrine_cms::ResolvedBlock;

use crate::blocks::{BlockRenderer, edit_id, text_field};
use crate::context::RenderContext;
use crate::engine;
use crate::error::PagesResult;

#[derive(Serialize)]
struct CallToActionView {
	label: String,
	url: String,
	style: String,
	edit_id: String,
}

/// Standalone action link, optionally styled.
///
/// Serves both the authored type and its generated output variant; the
/// two carry identical fields and differ only in their type tag.
pub struct CallToActionRenderer;

#[async_trait]
impl BlockRenderer for CallToActionRenderer {
	async fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> PagesResult<String> {
		let url = text_field(block, "Url");
		let mut label = text_field(block, "Label");
		if label.is_empty() {
			label = url.clone();
		}

		let view = CallToActionView {
			label,
			url,
			style: text_field(block, "Style"),
			edit_id: edit_id(block, ctx),
		};
		engine::render_with("call_to_action.html", &view)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::blocks::test_support::{empty_context, resolved_block};
	use serde_json::json;

	#[tokio::test]
	async fn renders_styled_link() {
		let block = resolved_block(json!({
			"_metadata": {"types": ["CallToAction"]},
			"Label": "Book a demo",
			"Url": "/demo",
			"Style": "primary"
		}));

		let html = CallToActionRenderer
			.render(&block, &empty_context())
			.await
			.unwrap();

		assert!(html.contains("cta-primary"));
		assert!(html.contains("href=\"/demo\""));
		assert!(html.contains(">Book a demo</a>"));
	}

	#[tokio::test]
	async fn label_falls_back_to_the_url() {
		let block = resolved_block(json!({
			"_metadata": {"types": ["CallToActionOutput"]},
			"Url": "/pricing"
		}));

		let html = CallToActionRenderer
			.render(&block, &empty_context())
			.await
			.unwrap();

		assert!(html.contains(">/pricing</a>"));
	}

	#[tokio::test]
	async fn unstyled_link_has_no_style_class() {
		let block = resolved_block(json!({
			"_metadata": {"types": ["CallToAction"]},
			"Label": "Contact",
			"Url": "/contact"
		}));

		let html = CallToActionRenderer
			.render(&block, &empty_context())
			.await
			.unwrap();

		assert!(html.contains("class=\"block call-to-action\""));
	}
}
