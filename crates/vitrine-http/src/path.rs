/// Normalize a CMS content path.
///
/// The CMS stores canonical URLs with a leading slash and a trailing slash
/// (the root stays `/`), so every lookup goes through this before the path
/// reaches a query. The function is idempotent: feeding its output back in
/// returns the same string.
///
/// # Examples
///
/// ```
/// use vitrine_http::normalize_content_path;
///
/// assert_eq!(normalize_content_path("news"), "/news/");
/// assert_eq!(normalize_content_path("/news/"), "/news/");
/// assert_eq!(normalize_content_path("/"), "/");
/// assert_eq!(normalize_content_path(""), "/");
/// ```
pub fn normalize_content_path(path: &str) -> String {
	let trimmed = path.trim();
	if trimmed.is_empty() || trimmed == "/" {
		return "/".to_string();
	}

	let mut normalized = String::with_capacity(trimmed.len() + 2);
	if !trimmed.starts_with('/') {
		normalized.push('/');
	}
	normalized.push_str(trimmed);
	if !normalized.ends_with('/') {
		normalized.push('/');
	}
	normalized
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", "/")]
	#[case("/", "/")]
	#[case("foo", "/foo/")]
	#[case("/foo", "/foo/")]
	#[case("foo/", "/foo/")]
	#[case("/foo/", "/foo/")]
	#[case("news/world", "/news/world/")]
	#[case("  /about  ", "/about/")]
	fn test_normalize_cases(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(normalize_content_path(input), expected);
	}

	#[rstest]
	#[case("")]
	#[case("/")]
	#[case("foo")]
	#[case("/foo")]
	#[case("foo/bar")]
	#[case("/deeply/nested/path/")]
	fn test_normalize_is_idempotent(#[case] input: &str) {
		let once = normalize_content_path(input);
		let twice = normalize_content_path(&once);
		assert_eq!(once, twice);
	}
}
