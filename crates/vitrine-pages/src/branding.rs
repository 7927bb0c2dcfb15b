//! Per-tenant branding derived from request headers.
//!
//! A demo tenant announces itself through the `cms_demo` header. The
//! resolver lower-cases that value into a slug and probes the public
//! directory for the tenant's asset files; whichever exist become
//! override URLs in the page shell. Nothing is cached: branding is
//! recomputed per request and never written.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// The only asset names a tenant directory may provide.
pub const BRANDING_ASSETS: [&str; 3] = ["favicon.ico", "header.png", "footer.png"];

/// Branding state for one request.
///
/// URL fields are empty strings when the tenant does not provide the
/// asset, which both the JSON echo and the templates treat as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingConfig {
	pub customer: String,
	pub has_custom_branding: bool,
	pub header_image: String,
	pub footer_image: String,
	pub favicon: String,
}

/// Theme flags for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
	pub test_theme: bool,
}

impl ThemeConfig {
	/// The test theme is on whenever a non-empty `clientId` header arrived.
	pub fn from_client_id(client_id: Option<&str>) -> Self {
		Self {
			test_theme: client_id.is_some_and(|v| !v.trim().is_empty()),
		}
	}

	/// Body class applied by the base layout, empty when themeless.
	pub fn body_class(&self) -> &'static str {
		if self.test_theme { "test" } else { "" }
	}
}

/// Probes tenant asset files under the public directory.
pub struct BrandingResolver {
	public_dir: PathBuf,
}

impl BrandingResolver {
	pub fn new(public_dir: impl Into<PathBuf>) -> Self {
		Self {
			public_dir: public_dir.into(),
		}
	}

	pub fn public_dir(&self) -> &Path {
		&self.public_dir
	}

	/// Slugs become filesystem path components, so only a conservative
	/// character set is accepted.
	fn valid_slug(slug: &str) -> bool {
		!slug.is_empty()
			&& slug
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
	}

	/// Branding for the given `cms_demo` header value.
	///
	/// No header, an empty value, or a slug that fails validation all
	/// yield the default config with branding off.
	pub async fn resolve(&self, tenant_header: Option<&str>) -> BrandingConfig {
		let Some(raw) = tenant_header else {
			return BrandingConfig::default();
		};
		let slug = raw.trim().to_lowercase();
		if !Self::valid_slug(&slug) {
			return BrandingConfig::default();
		}

		let mut config = BrandingConfig {
			customer: slug.clone(),
			..BrandingConfig::default()
		};

		for asset in BRANDING_ASSETS {
			let path = self.public_dir.join(&slug).join(asset);
			if tokio::fs::try_exists(&path).await.unwrap_or(false) {
				config.has_custom_branding = true;
				let url = format!("/branding/{slug}/{asset}");
				match asset {
					"favicon.ico" => config.favicon = url,
					"header.png" => config.header_image = url,
					"footer.png" => config.footer_image = url,
					_ => {}
				}
			}
		}

		config
	}
}
