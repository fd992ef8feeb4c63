use crate::error::Result;
use crate::filter::StyleTag;
use crate::output::Output;
use crate::url::mapper::WcResolver;
use crate::url::split::{is_url, join, split, split_peg};

/// Infer a URL's final path segment from the working copy's checkout
/// location and append it, unless the URL opts out by ending with `/.`.
///
/// Emits informational before/after lines when the URL changes, so the
/// operator can see the adjustment.
pub fn adjust_url_for_wc_path(
	url: &str,
	wc_path: &str,
	resolver: &dyn WcResolver,
	out: &Output,
) -> Result<String> {
	let (base, peg) = split_peg(url);
	if base.ends_with("/.") {
		out.write_ln("Skipping adjustment for URL ending with '/.':")?;
		out.write_ln(&format!("  {}", out.paint(StyleTag::Info, url)))?;
		return Ok(url.to_string());
	}

	let wc_url = wc_url_of(wc_path, resolver)?;
	let (_wc_head, _wc_middle, wc_tail) = split(&wc_url);
	let (url_head, url_middle, _url_tail) = split(base);
	let mut new_url = join(url_head, url_middle, wc_tail);
	new_url.push_str(peg);

	if new_url != url {
		out.write_ln("Adjusting URL to match working copy tail:")?;
		out.write_ln(&format!("  Was: {}", out.paint(StyleTag::Info, url)))?;
		out.write_ln(&format!("  Now: {}", out.paint(StyleTag::Info, &new_url)))?;
		out.write_ln(&format!(
			"  (append {} to URL to avoid adjustment)",
			out.paint(StyleTag::Info, "'/.'")
		))?;
	}
	Ok(new_url)
}

fn wc_url_of(path: &str, resolver: &dyn WcResolver) -> Result<String> {
	if is_url(path) {
		Ok(path.to_string())
	} else {
		resolver.wc_url(path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SvnshimError;
	use crate::output::ColorScheme;
	use std::collections::HashMap;

	struct StubResolver {
		urls: HashMap<String, String>,
	}

	impl WcResolver for StubResolver {
		fn wc_url(&self, path: &str) -> Result<String> {
			self.urls
				.get(path)
				.cloned()
				.ok_or_else(|| SvnshimError::InvalidPath {
					path: path.to_string(),
				})
		}
	}

	fn resolver_for(path: &str, url: &str) -> StubResolver {
		let mut urls = HashMap::new();
		urls.insert(path.to_string(), url.to_string());
		StubResolver { urls }
	}

	#[test]
	fn test_tail_is_inferred_from_working_copy() {
		let resolver = resolver_for(".", "http://server/repo/trunk/comp");
		let out = Output::buffer(ColorScheme::disabled());
		let adjusted = adjust_url_for_wc_path(
			"http://server/repo/branches/somebranch",
			".",
			&resolver,
			&out,
		)
		.unwrap();
		assert_eq!(adjusted, "http://server/repo/branches/somebranch/comp");

		let notice = out.take_buffer();
		assert!(notice.contains("Adjusting URL to match working copy tail:"));
		assert!(notice.contains("Was: http://server/repo/branches/somebranch"));
		assert!(notice.contains("Now: http://server/repo/branches/somebranch/comp"));
	}

	#[test]
	fn test_explicit_opt_out_with_trailing_dot() {
		let resolver = resolver_for(".", "http://server/repo/trunk/comp");
		let out = Output::buffer(ColorScheme::disabled());
		let adjusted = adjust_url_for_wc_path(
			"http://server/repo/branches/somebranch/.",
			".",
			&resolver,
			&out,
		)
		.unwrap();
		assert_eq!(adjusted, "http://server/repo/branches/somebranch/.");
		assert!(out.take_buffer().contains("Skipping adjustment"));
	}

	#[test]
	fn test_peg_revision_is_preserved() {
		let resolver = resolver_for(".", "http://server/repo/trunk/comp");
		let out = Output::buffer(ColorScheme::disabled());
		let adjusted = adjust_url_for_wc_path(
			"http://server/repo/branches/somebranch@42",
			".",
			&resolver,
			&out,
		)
		.unwrap();
		assert_eq!(adjusted, "http://server/repo/branches/somebranch/comp@42");
	}

	#[test]
	fn test_unchanged_url_prints_no_notice() {
		let resolver = resolver_for(".", "http://server/repo/trunk/comp");
		let out = Output::buffer(ColorScheme::disabled());
		let adjusted = adjust_url_for_wc_path(
			"http://server/repo/branches/somebranch/comp",
			".",
			&resolver,
			&out,
		)
		.unwrap();
		assert_eq!(adjusted, "http://server/repo/branches/somebranch/comp");
		assert_eq!(out.take_buffer(), "");
	}
}
