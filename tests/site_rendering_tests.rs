//! Server-rendered HTML surfaces, exercised through the full route table.

mod common;

use std::sync::Arc;

use hyper::{Method, StatusCode};
use serde_json::json;

use vitrine_cms::AuthMode;
use vitrine_http::{Handler, Request};

use common::{
	ScriptedTransport, body_html, get, items_response, page_item, router_with,
	router_with_public_dir,
};

#[tokio::test]
async fn homepage_renders_a_full_document() {
	let transport = Arc::new(ScriptedTransport::new().on(
		"query Homepage",
		items_response("_Content", json!([page_item("home1", "Welcome home")])),
	));
	let router = router_with(transport);

	let response = router.handle(get("/")).await.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.headers.get("content-type").unwrap(),
		"text/html; charset=utf-8"
	);
	let html = body_html(&response);
	assert!(html.contains("<!DOCTYPE html>"));
	assert!(html.contains("<title>Welcome home</title>"));
	assert!(html.contains("href=\"/assets/site.css\""));
	assert!(html.contains("Hero heading"));
}

#[tokio::test]
async fn content_paths_are_normalized_and_localized() {
	let transport = Arc::new(ScriptedTransport::new().on(
		"PageByPath",
		items_response("_Content", json!([page_item("p1", "Widgets")])),
	));
	let router = router_with(transport.clone());

	let response = router
		.handle(get("/products/widget?loc=sv"))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		transport.calls()[0].variables,
		json!({"path": "/products/widget/", "locale": ["sv"]})
	);
}

#[tokio::test]
async fn composition_pages_render_blocks_in_document_order() {
	let page = json!({
		"_metadata": {"key": "c1", "types": ["LandingPage", "_Page"], "displayName": "Composed"},
		"composition": {
			"grids": [{
				"rows": [{
					"columns": [{
						"elements": [
							{
								"key": "el-1",
								"component": {
									"_metadata": {"types": ["Hero"]},
									"Heading": "First hero"
								}
							},
							{
								"key": "el-2",
								"component": {
									"_metadata": {"types": ["Text"]},
									"Body": "<p>Second text</p>"
								}
							}
						]
					}]
				}]
			}]
		}
	});
	let transport = Arc::new(
		ScriptedTransport::new().on("PageByPath", items_response("_Content", json!([page]))),
	);
	let router = router_with(transport);

	let response = router.handle(get("/composed")).await.unwrap();

	let html = body_html(&response);
	let hero_at = html.find("First hero").unwrap();
	let text_at = html.find("Second text").unwrap();
	assert!(hero_at < text_at);
}

#[tokio::test]
async fn unknown_content_paths_render_the_not_found_page() {
	let router = router_with(Arc::new(ScriptedTransport::new()));

	let response = router.handle(get("/nowhere/special")).await.unwrap();

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	let html = body_html(&response);
	assert!(html.contains("Page not found"));
	assert!(html.contains("/nowhere/special/"));
}

#[tokio::test]
async fn tenant_branding_reaches_the_page_chrome() {
	let dir = tempfile::tempdir().unwrap();
	let tenant = dir.path().join("acme");
	std::fs::create_dir_all(&tenant).unwrap();
	std::fs::write(tenant.join("favicon.ico"), b"ico").unwrap();
	std::fs::write(tenant.join("header.png"), b"png").unwrap();

	let transport = Arc::new(ScriptedTransport::new().on(
		"query Homepage",
		items_response("_Content", json!([page_item("home1", "Welcome")])),
	));
	let router = router_with_public_dir(transport, dir.path().to_path_buf());

	let request = Request::builder()
		.method(Method::GET)
		.uri("/")
		.header("cms_demo", "Acme")
		.build()
		.unwrap();
	let response = router.handle(request).await.unwrap();

	let html = body_html(&response);
	assert!(html.contains("href=\"/branding/acme/favicon.ico\""));
	assert!(html.contains("src=\"/branding/acme/header.png\""));
	assert!(!html.contains("branding-footer"));
}

#[tokio::test]
async fn branding_assets_serve_and_probe_end_to_end() {
	let dir = tempfile::tempdir().unwrap();
	let tenant = dir.path().join("acme");
	std::fs::create_dir_all(&tenant).unwrap();
	std::fs::write(tenant.join("favicon.ico"), b"iconbytes").unwrap();

	let transport = Arc::new(ScriptedTransport::new());
	let router = router_with_public_dir(transport, dir.path().to_path_buf());

	let served = router
		.handle(get("/branding/acme/favicon.ico"))
		.await
		.unwrap();
	assert_eq!(served.status, StatusCode::OK);
	assert_eq!(served.body.as_ref(), b"iconbytes");

	let probe = Request::builder()
		.method(Method::HEAD)
		.uri("/branding/acme/favicon.ico")
		.build()
		.unwrap();
	let probed = router.handle(probe).await.unwrap();
	assert_eq!(probed.status, StatusCode::OK);
	assert_eq!(probed.headers.get("content-length").unwrap(), "9");
	assert!(probed.body.is_empty());

	let missing = router
		.handle(get("/branding/ghost/favicon.ico"))
		.await
		.unwrap();
	assert_eq!(missing.status, StatusCode::NOT_FOUND);

	let unknown_name = router
		.handle(get("/branding/acme/passwd"))
		.await
		.unwrap();
	assert_eq!(unknown_name.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn embedded_assets_serve_from_the_binary() {
	let router = router_with(Arc::new(ScriptedTransport::new()));

	let script = router.handle(get("/assets/preview-bridge.js")).await.unwrap();
	assert_eq!(script.status, StatusCode::OK);
	assert_eq!(
		script.headers.get("content-type").unwrap(),
		"text/javascript"
	);
	assert!(body_html(&script).contains("contentSaved"));

	let styles = router.handle(get("/assets/site.css")).await.unwrap();
	assert_eq!(styles.status, StatusCode::OK);
	assert_eq!(styles.headers.get("content-type").unwrap(), "text/css");

	let missing = router.handle(get("/assets/unknown.js")).await.unwrap();
	assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preview_route_renders_the_bridge_shell() {
	let draft = json!([{
		"_metadata": {"key": "draft1", "version": "9", "types": ["LandingPage", "_Page"],
			"displayName": "Draft"},
		"Heading": "Draft",
		"MainContentArea": [{
			"_metadata": {"key": "b1", "types": ["Hero"]},
			"Heading": "Draft hero"
		}]
	}]);
	let transport = Arc::new(
		ScriptedTransport::new().on("PreviewContent", items_response("_Content", draft)),
	);
	let router = router_with(transport.clone());

	let response = router
		.handle(get("/preview?key=draft1&ver=9&ctx=edit"))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	let html = body_html(&response);
	assert!(html.contains("id=\"preview-root\""));
	assert!(html.contains("id=\"preview-bridge-config\""));
	assert!(html.contains("src=\"/assets/preview-bridge.js\""));
	assert!(html.contains("data-epi-block-id=\"b1\""));
	assert_eq!(
		transport.calls()[0].variables,
		json!({"key": "draft1", "version": "9", "locale": null})
	);
}

#[tokio::test]
async fn preview_token_in_the_url_switches_the_gateway_to_token_mode() {
	let draft = json!([{
		"_metadata": {"key": "draft1", "types": ["LandingPage", "_Page"], "displayName": "Draft"},
		"Heading": "Draft"
	}]);
	let transport = Arc::new(
		ScriptedTransport::new().on("PreviewContent", items_response("_Content", draft)),
	);
	let router = router_with(transport.clone());

	let response = router
		.handle(get("/preview?key=draft1&preview_token=epi-tok"))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		transport.calls()[0].auth,
		AuthMode::PreviewToken("epi-tok".to_string())
	);
	// The token itself never reaches the rendered page
	assert!(!body_html(&response).contains("epi-tok"));
}

#[tokio::test]
async fn preview_without_a_key_explains_itself() {
	let router = router_with(Arc::new(ScriptedTransport::new()));

	let response = router.handle(get("/preview")).await.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert!(body_html(&response).contains("must be opened from the CMS editor"));
}
