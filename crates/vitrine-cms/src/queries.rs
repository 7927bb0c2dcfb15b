//! GraphQL documents sent to the CMS.
//!
//! Variables are always passed through the `variables` object, never
//! interpolated into the query text. Shared selections live in fragments
//! that get concatenated onto each document once at startup.

use once_cell::sync::Lazy;

/// `_metadata` selection shared by every query.
const META_FRAGMENT: &str = r#"
fragment ContentMeta on _IContent {
  _metadata {
    key
    version
    locale
    displayName
    types
    url {
      default
    }
    status
    published
  }
}
"#;

/// Field selections for every known block type.
const BLOCK_FRAGMENT: &str = r#"
fragment BlockFields on _IContent {
  ...ContentMeta
  ... on Hero {
    Heading
    SubHeading
    BackgroundImageUrl
    CallToActionLabel
    CallToActionUrl
  }
  ... on Text {
    Body
  }
  ... on ContentBlock {
    Heading
    Body
    ImageUrl
  }
  ... on Image {
    ImageUrl
    AltText
    Caption
  }
  ... on Menu {
    Heading
    MenuItems {
      Label
      Url
    }
  }
  ... on Carousel {
    Heading
    Slides {
      key
    }
  }
  ... on FeatureGrid {
    Heading
    Cards {
      key
    }
  }
  ... on CallToAction {
    Label
    Url
    Style
  }
  ... on CallToActionOutput {
    Label
    Url
    Style
  }
  ... on PromoBlock {
    Heading
    Body
    ImageUrl
    LinkUrl
    LinkLabel
  }
  ... on DemoBanner {
    Message
  }
}
"#;

/// Visual-builder layout tree. The collections come back as plain arrays
/// because of the `nodes` aliases here; the resolver also accepts the
/// unaliased wrapper shape older query variants produce.
const COMPOSITION_FRAGMENT: &str = r#"
fragment CompositionFields on _IExperience {
  composition {
    grids: nodes {
      key
      rows: nodes {
        key
        columns: nodes {
          key
          elements: nodes {
            key
            displayName
            component {
              ...BlockFields
            }
            element {
              ...BlockFields
            }
          }
        }
      }
    }
  }
}
"#;

/// Everything a page of any known type can carry: its own fields, the
/// named content areas of classic pages, and the composition tree of
/// visual-builder pages.
const PAGE_FRAGMENT: &str = r#"
fragment PageFields on _IContent {
  ...ContentMeta
  ... on ArticlePage {
    Heading
    SubHeading
    Body
    Author
  }
  ... on LandingPage {
    Heading
    TopContentArea {
      ...BlockFields
    }
    MainContentArea {
      ...BlockFields
    }
  }
  ...CompositionFields
}
"#;

fn with_fragments(document: &str, fragments: &[&str]) -> String {
	let mut text = String::from(document);
	for fragment in fragments {
		text.push_str(fragment);
	}
	text
}

/// Fetch one page of any type by its canonical path.
pub static PAGE_BY_PATH: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query PageByPath($path: String, $locale: [Locales!]) {
  _Content(where: { _metadata: { url: { default: { eq: $path } } } }, locale: $locale) {
    items {
      ...PageFields
    }
  }
}
"#,
		&[
			PAGE_FRAGMENT,
			COMPOSITION_FRAGMENT,
			BLOCK_FRAGMENT,
			META_FRAGMENT,
		],
	)
});

/// Fetch the homepage with its full composition tree.
pub static HOMEPAGE: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query Homepage {
  _Content(where: { _metadata: { url: { default: { eq: "/" } } } }) {
    items {
      ...PageFields
    }
  }
}
"#,
		&[
			PAGE_FRAGMENT,
			COMPOSITION_FRAGMENT,
			BLOCK_FRAGMENT,
			META_FRAGMENT,
		],
	)
});

/// Fetch a single block by key.
pub static BLOCK_BY_KEY: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query BlockByKey($key: String, $locale: [Locales!]) {
  _Content(where: { _metadata: { key: { eq: $key } } }, locale: $locale) {
    items {
      ...BlockFields
    }
  }
}
"#,
		&[BLOCK_FRAGMENT, META_FRAGMENT],
	)
});

/// Fetch a card through its type-specific root field.
pub static CARD_BY_KEY: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query CardByKey($key: String) {
  Card(where: { _metadata: { key: { eq: $key } } }) {
    items {
      ...ContentMeta
      Heading
      Body
      ImageUrl
      LinkUrl
    }
  }
}
"#,
		&[META_FRAGMENT],
	)
});

/// Fetch a feature card through its type-specific root field.
pub static FEATURE_CARD_BY_KEY: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query FeatureCardByKey($key: String) {
  FeatureCard(where: { _metadata: { key: { eq: $key } } }) {
    items {
      ...ContentMeta
      Heading
      Body
      IconUrl
      LinkUrl
    }
  }
}
"#,
		&[META_FRAGMENT],
	)
});

/// Latest news articles, newest first.
pub static NEWS_ARTICLES: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query NewsArticles($limit: Int) {
  ArticlePage(orderBy: { _metadata: { published: DESC } }, limit: $limit) {
    items {
      ...ContentMeta
      Heading
      SubHeading
      Author
    }
  }
}
"#,
		&[META_FRAGMENT],
	)
});

/// Type tags of everything that is a page.
pub static PAGE_TYPES: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query PageTypes {
  _Content(where: { _metadata: { types: { eq: "_Page" } } }) {
    items {
      ...ContentMeta
    }
  }
}
"#,
		&[META_FRAGMENT],
	)
});

/// All pages declaring the given type tag.
pub static PAGE_INSTANCES: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query PageInstances($type: String) {
  _Content(where: { _metadata: { types: { eq: $type } } }) {
    items {
      ...ContentMeta
    }
  }
}
"#,
		&[META_FRAGMENT],
	)
});

/// Block inventory: every reusable component.
pub static BLOCKS: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query Blocks {
  _Content(where: { _metadata: { types: { eq: "_Component" } } }) {
    items {
      ...BlockFields
    }
  }
}
"#,
		&[BLOCK_FRAGMENT, META_FRAGMENT],
	)
});

/// Fetch a navigation menu, optionally by display name.
pub static MENU: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query SiteMenu($name: String) {
  Menu(where: { _metadata: { displayName: { eq: $name } } }) {
    items {
      ...ContentMeta
      Heading
      MenuItems {
        Label
        Url
      }
    }
  }
}
"#,
		&[META_FRAGMENT],
	)
});

/// Preview fetch pinned to an exact draft revision.
pub static PREVIEW_CONTENT_BY_VERSION: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query PreviewContent($key: String, $version: String, $locale: [Locales!]) {
  _Content(
    where: { _metadata: { key: { eq: $key }, version: { eq: $version } } }
    locale: $locale
  ) {
    items {
      ...PageFields
    }
  }
}
"#,
		&[
			PAGE_FRAGMENT,
			COMPOSITION_FRAGMENT,
			BLOCK_FRAGMENT,
			META_FRAGMENT,
		],
	)
});

/// Preview fetch without a version: resolves whatever revision the token
/// considers latest.
pub static PREVIEW_CONTENT_LATEST: Lazy<String> = Lazy::new(|| {
	with_fragments(
		r#"query PreviewContentLatest($key: String, $locale: [Locales!]) {
  _Content(where: { _metadata: { key: { eq: $key } } }, locale: $locale) {
    items {
      ...PageFields
    }
  }
}
"#,
		&[
			PAGE_FRAGMENT,
			COMPOSITION_FRAGMENT,
			BLOCK_FRAGMENT,
			META_FRAGMENT,
		],
	)
});

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(&PAGE_BY_PATH)]
	#[case(&HOMEPAGE)]
	#[case(&PREVIEW_CONTENT_BY_VERSION)]
	#[case(&PREVIEW_CONTENT_LATEST)]
	fn test_page_documents_carry_their_fragments(#[case] document: &Lazy<String>) {
		assert!(document.contains("fragment PageFields"));
		assert!(document.contains("fragment CompositionFields"));
		assert!(document.contains("fragment BlockFields"));
		assert!(document.contains("fragment ContentMeta"));
	}

	#[rstest]
	fn test_variables_are_never_inlined() {
		// Lookup values travel as GraphQL variables, not string splices.
		assert!(PAGE_BY_PATH.contains("$path"));
		assert!(BLOCK_BY_KEY.contains("$key"));
		assert!(PREVIEW_CONTENT_BY_VERSION.contains("$version"));
		assert!(!PREVIEW_CONTENT_LATEST.contains("$version"));
	}

	#[rstest]
	fn test_composition_uses_aliased_node_collections() {
		assert!(PAGE_BY_PATH.contains("grids: nodes"));
		assert!(PAGE_BY_PATH.contains("elements: nodes"));
	}
}
