//! Template engine with all site templates compiled in.
//!
//! Templates are embedded with `include_str!` and registered once into a
//! global Tera instance, so rendering never touches the filesystem.

use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{PagesError, PagesResult};

static TERA: Lazy<Tera> = Lazy::new(|| {
	let mut tera = Tera::default();

	tera.add_raw_template("base.html", include_str!("../templates/base.html"))
		.expect("Failed to add base.html template");

	tera.add_raw_template("page.html", include_str!("../templates/page.html"))
		.expect("Failed to add page.html template");

	tera.add_raw_template("preview.html", include_str!("../templates/preview.html"))
		.expect("Failed to add preview.html template");

	tera.add_raw_template(
		"preview_missing_key.html",
		include_str!("../templates/preview_missing_key.html"),
	)
	.expect("Failed to add preview_missing_key.html template");

	tera.add_raw_template("error_panel.html", include_str!("../templates/error_panel.html"))
		.expect("Failed to add error_panel.html template");

	tera.add_raw_template("not_found.html", include_str!("../templates/not_found.html"))
		.expect("Failed to add not_found.html template");

	tera.add_raw_template("hero.html", include_str!("../templates/hero.html"))
		.expect("Failed to add hero.html template");

	tera.add_raw_template("text.html", include_str!("../templates/text.html"))
		.expect("Failed to add text.html template");

	tera.add_raw_template(
		"content_block.html",
		include_str!("../templates/content_block.html"),
	)
	.expect("Failed to add content_block.html template");

	tera.add_raw_template("image.html", include_str!("../templates/image.html"))
		.expect("Failed to add image.html template");

	tera.add_raw_template("menu.html", include_str!("../templates/menu.html"))
		.expect("Failed to add menu.html template");

	tera.add_raw_template("carousel.html", include_str!("../templates/carousel.html"))
		.expect("Failed to add carousel.html template");

	tera.add_raw_template(
		"feature_grid.html",
		include_str!("../templates/feature_grid.html"),
	)
	.expect("Failed to add feature_grid.html template");

	tera.add_raw_template(
		"call_to_action.html",
		include_str!("../templates/call_to_action.html"),
	)
	.expect("Failed to add call_to_action.html template");

	tera.add_raw_template("promo_block.html", include_str!("../templates/promo_block.html"))
		.expect("Failed to add promo_block.html template");

	tera.add_raw_template("demo_banner.html", include_str!("../templates/demo_banner.html"))
		.expect("Failed to add demo_banner.html template");

	tera
});

/// Renders a registered template with the given context.
pub fn render(template: &str, context: &Context) -> PagesResult<String> {
	TERA.render(template, context).map_err(|source| PagesError::Render {
		template: template.to_string(),
		source,
	})
}

/// Renders a registered template from any serializable view model.
pub fn render_with<T: Serialize>(template: &str, data: &T) -> PagesResult<String> {
	let context = Context::from_serialize(data)?;
	render(template, &context)
}
