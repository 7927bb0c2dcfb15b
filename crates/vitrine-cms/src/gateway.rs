use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::AuthMode;
use crate::content::ContentItem;
use crate::error::{CmsError, CmsResult};
use crate::queries;
use crate::transport::GraphqlTransport;

/// Parameters threading a preview fetch: the item key plus the optional
/// version/locale pin and the editor-issued token.
#[derive(Debug, Clone, Default)]
pub struct PreviewRequest {
	pub key: String,
	pub version: Option<String>,
	pub locale: Option<String>,
	pub preview_token: Option<String>,
}

impl PreviewRequest {
	/// Token mode when the editor supplied a token, key mode otherwise.
	pub fn auth_mode(&self) -> AuthMode {
		AuthMode::from_preview_token(self.preview_token.as_deref())
	}
}

/// High-level client for the CMS GraphQL API.
///
/// Wraps a [`GraphqlTransport`] with the response handling every operation
/// shares: GraphQL-error detection, `items` extraction under the query's
/// root field, and empty-result mapping. Holds no per-request state, so one
/// gateway is shared across the whole server.
pub struct CmsGateway {
	transport: Arc<dyn GraphqlTransport>,
}

impl CmsGateway {
	pub fn new(transport: Arc<dyn GraphqlTransport>) -> Self {
		Self { transport }
	}

	/// Send one GraphQL request and surface GraphQL-level failures.
	///
	/// A 2xx transport response can still carry an `errors` array; that is
	/// a failure, never a success with partial data.
	async fn send(&self, query: &str, variables: Value, auth: &AuthMode) -> CmsResult<Value> {
		let response = self.transport.execute(query, variables, auth).await?;

		if let Some(errors) = response.get("errors")
			&& errors.as_array().is_some_and(|list| !list.is_empty())
		{
			return Err(CmsError::GraphqlErrors(errors.clone()));
		}

		Ok(response)
	}

	/// Items under `data.<root>.items`.
	///
	/// A missing or null container is an empty result, not an error; a
	/// container of the wrong shape is.
	fn extract_items(response: &Value, root: &str) -> CmsResult<Vec<ContentItem>> {
		let items = match response.pointer(&format!("/data/{root}/items")) {
			Some(items) if !items.is_null() => items,
			_ => return Ok(Vec::new()),
		};
		serde_json::from_value(items.clone()).map_err(|e| {
			CmsError::InvalidResponse(format!("items under {root} did not parse: {e}"))
		})
	}

	/// Pages matching a canonical path. The caller keeps the full list so
	/// it can report the upstream item count.
	pub async fn fetch_page_by_path(
		&self,
		path: &str,
		locale: Option<&str>,
	) -> CmsResult<Vec<ContentItem>> {
		let variables = json!({
			"path": path,
			"locale": locale.map(|l| vec![l]),
		});
		let response = self
			.send(&queries::PAGE_BY_PATH, variables, &AuthMode::AppKey)
			.await?;
		Self::extract_items(&response, "_Content")
	}

	/// The homepage with its composition tree.
	pub async fn fetch_homepage(&self) -> CmsResult<Option<ContentItem>> {
		let response = self
			.send(&queries::HOMEPAGE, json!({}), &AuthMode::AppKey)
			.await?;
		Ok(Self::extract_items(&response, "_Content")?.into_iter().next())
	}

	/// One block by key.
	pub async fn fetch_block(
		&self,
		key: &str,
		locale: Option<&str>,
	) -> CmsResult<Option<ContentItem>> {
		let variables = json!({
			"key": key,
			"locale": locale.map(|l| vec![l]),
		});
		let response = self
			.send(&queries::BLOCK_BY_KEY, variables, &AuthMode::AppKey)
			.await?;
		Ok(Self::extract_items(&response, "_Content")?.into_iter().next())
	}

	/// One card, read through its type-specific root field.
	pub async fn fetch_card(&self, key: &str) -> CmsResult<Option<ContentItem>> {
		let response = self
			.send(&queries::CARD_BY_KEY, json!({ "key": key }), &AuthMode::AppKey)
			.await?;
		Ok(Self::extract_items(&response, "Card")?.into_iter().next())
	}

	/// One feature card, read through its type-specific root field.
	pub async fn fetch_feature_card(&self, key: &str) -> CmsResult<Option<ContentItem>> {
		let response = self
			.send(
				&queries::FEATURE_CARD_BY_KEY,
				json!({ "key": key }),
				&AuthMode::AppKey,
			)
			.await?;
		Ok(Self::extract_items(&response, "FeatureCard")?
			.into_iter()
			.next())
	}

	/// Latest news articles, newest first.
	pub async fn fetch_news_articles(&self, limit: Option<u32>) -> CmsResult<Vec<ContentItem>> {
		let response = self
			.send(
				&queries::NEWS_ARTICLES,
				json!({ "limit": limit }),
				&AuthMode::AppKey,
			)
			.await?;
		Self::extract_items(&response, "ArticlePage")
	}

	/// Distinct page type tags, in first-seen order.
	pub async fn fetch_page_types(&self) -> CmsResult<Vec<String>> {
		let response = self
			.send(&queries::PAGE_TYPES, json!({}), &AuthMode::AppKey)
			.await?;
		let items = Self::extract_items(&response, "_Content")?;

		let mut seen = Vec::new();
		for item in &items {
			if let Some(tag) = item.primary_type()
				&& !seen.iter().any(|s| s == tag)
			{
				seen.push(tag.to_string());
			}
		}
		Ok(seen)
	}

	/// All pages declaring the given type tag.
	pub async fn fetch_page_instances(&self, page_type: &str) -> CmsResult<Vec<ContentItem>> {
		let response = self
			.send(
				&queries::PAGE_INSTANCES,
				json!({ "type": page_type }),
				&AuthMode::AppKey,
			)
			.await?;
		Self::extract_items(&response, "_Content")
	}

	/// Block inventory.
	pub async fn fetch_blocks(&self) -> CmsResult<Vec<ContentItem>> {
		let response = self
			.send(&queries::BLOCKS, json!({}), &AuthMode::AppKey)
			.await?;
		Self::extract_items(&response, "_Content")
	}

	/// A navigation menu, optionally by display name.
	pub async fn fetch_menu(&self, name: Option<&str>) -> CmsResult<Option<ContentItem>> {
		let response = self
			.send(&queries::MENU, json!({ "name": name }), &AuthMode::AppKey)
			.await?;
		Ok(Self::extract_items(&response, "Menu")?.into_iter().next())
	}

	/// Draft or published content for the preview surface.
	///
	/// Token mode when the request carries a token, key mode otherwise.
	/// Without a version the lookup resolves to the latest revision, which
	/// may not be the exact draft the editor is on; that ambiguity comes
	/// from upstream and is only logged here.
	pub async fn fetch_preview_content(
		&self,
		request: &PreviewRequest,
	) -> CmsResult<Option<ContentItem>> {
		let auth = request.auth_mode();
		let locale = request.locale.as_ref().map(|l| vec![l.clone()]);

		let response = match &request.version {
			Some(version) => {
				let variables = json!({
					"key": request.key,
					"version": version,
					"locale": locale,
				});
				self.send(&queries::PREVIEW_CONTENT_BY_VERSION, variables, &auth)
					.await?
			}
			None => {
				if auth.is_preview() {
					debug!(
						key = %request.key,
						"preview token without version, resolving latest revision"
					);
				}
				let variables = json!({
					"key": request.key,
					"locale": locale,
				});
				self.send(&queries::PREVIEW_CONTENT_LATEST, variables, &auth)
					.await?
			}
		};
		Ok(Self::extract_items(&response, "_Content")?.into_iter().next())
	}

	/// Hydrate referenced slides in parallel; failures drop out.
	///
	/// One broken reference must not take down the rest: every fetch
	/// resolves independently and only successful, present items are kept.
	pub async fn fetch_blocks_by_keys(&self, keys: &[String]) -> Vec<ContentItem> {
		let fetches = keys.iter().map(|key| self.fetch_block(key, None));
		futures::future::join_all(fetches)
			.await
			.into_iter()
			.zip(keys)
			.filter_map(|(result, key)| match result {
				Ok(item) => item,
				Err(e) => {
					warn!(key = %key, error = %e, "dropping block that failed to hydrate");
					None
				}
			})
			.collect()
	}

	/// Hydrate referenced feature cards in parallel; failures drop out.
	pub async fn fetch_feature_cards_by_keys(&self, keys: &[String]) -> Vec<ContentItem> {
		let fetches = keys.iter().map(|key| self.fetch_feature_card(key));
		futures::future::join_all(fetches)
			.await
			.into_iter()
			.zip(keys)
			.filter_map(|(result, key)| match result {
				Ok(item) => item,
				Err(e) => {
					warn!(key = %key, error = %e, "dropping card that failed to hydrate");
					None
				}
			})
			.collect()
	}
}
