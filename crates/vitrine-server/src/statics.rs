use bytes::Bytes;
use hyper::Method;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use vitrine_http::{Request, Response};

const CACHE_CONTROL: &str = "public, max-age=86400";

/// An asset compiled into the binary with `include_bytes!`/`include_str!`.
#[derive(Debug, Clone, Copy)]
pub struct StaticAsset {
	pub name: &'static str,
	pub bytes: &'static [u8],
}

impl StaticAsset {
	pub const fn new(name: &'static str, bytes: &'static [u8]) -> Self {
		Self { name, bytes }
	}
}

/// Map a file name to its Content-Type by extension.
pub fn content_type_for_path(path: &str) -> &'static str {
	let extension = path.rsplit('.').next().unwrap_or("");
	match extension {
		"html" => "text/html; charset=utf-8",
		"css" => "text/css",
		"js" | "mjs" => "text/javascript",
		"json" => "application/json",
		"png" => "image/png",
		"jpg" | "jpeg" => "image/jpeg",
		"gif" => "image/gif",
		"svg" => "image/svg+xml",
		"ico" => "image/x-icon",
		"webp" => "image/webp",
		"woff2" => "font/woff2",
		"txt" => "text/plain; charset=utf-8",
		"xml" => "application/xml",
		_ => "application/octet-stream",
	}
}

/// Serve an embedded asset.
///
/// HEAD requests get the same headers, including Content-Length, with an
/// empty body.
pub fn serve_asset(request: &Request, asset: &StaticAsset) -> Response {
	let response = Response::ok()
		.with_header("Content-Type", content_type_for_path(asset.name))
		.with_header("Cache-Control", CACHE_CONTROL)
		.with_header("Content-Length", &asset.bytes.len().to_string());

	if request.method == Method::HEAD {
		return response;
	}
	response.with_body(Bytes::from_static(asset.bytes))
}

/// Serve a file from `root` on disk.
///
/// `relative` is joined component-wise; parent references and absolute
/// segments are rejected outright. Missing or unreadable files become 404 so
/// callers can treat disk assets as probe-able, like the branding images.
pub async fn serve_disk_file(request: &Request, root: &Path, relative: &str) -> Response {
	let Some(path) = safe_join(root, relative) else {
		warn!(relative, "rejected unsafe asset path");
		return Response::not_found();
	};

	match tokio::fs::read(&path).await {
		Ok(bytes) => {
			let response = Response::ok()
				.with_header("Content-Type", content_type_for_path(relative))
				.with_header("Cache-Control", CACHE_CONTROL)
				.with_header("Content-Length", &bytes.len().to_string());

			if request.method == Method::HEAD {
				return response;
			}
			response.with_body(bytes)
		}
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
			debug!(path = %path.display(), "asset not found on disk");
			Response::not_found()
		}
		Err(err) => {
			warn!(path = %path.display(), error = %err, "failed to read asset");
			Response::not_found()
		}
	}
}

/// Join `relative` onto `root`, allowing only normal path components.
fn safe_join(root: &Path, relative: &str) -> Option<PathBuf> {
	let mut path = root.to_path_buf();
	for component in Path::new(relative).components() {
		match component {
			Component::Normal(part) => path.push(part),
			Component::CurDir => {}
			_ => return None,
		}
	}
	Some(path)
}
