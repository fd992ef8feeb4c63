use crate::error::{Result, SvnshimError};
use crate::url::split::{head, is_url, join, split};
use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Alias of the form `//name...` at the start of the string.
static ALIAS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^//(?P<alias>[^/]+)(?P<after>.*)$").expect("static regex"));

/// Absolute URL (e.g. `https://...`) somewhere after the start; the greedy
/// prefix makes the rightmost occurrence win.
static ABS_URL_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^.*[:/](?P<url>\w{2,}://.*)$").expect("static regex"));

/// Keyword at a path-component boundary. The key needs 2+ word characters
/// so single-character drive letters like `C:` never match, and the text
/// after the colon must not begin with `//` (that would be a scheme).
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<before>|.*?/)(?P<key>\w{2,}):(?P<after>.?$|[^/].*|/[^/].*)")
		.expect("static regex")
});

/// Looks up the repository URL of a working-copy path. Behind a trait so
/// mapping stays unit-testable without a Subversion client.
pub trait WcResolver {
	fn wc_url(&self, path: &str) -> Result<String>;
}

/// Keyword suffixes relative to the head of the preceding URL.
fn head_suffix(key: &str) -> Option<&'static str> {
	match key {
		"tr" => Some("trunk"),
		"br" => Some("branches"),
		"tag" => Some("tags"),
		"rel" => Some("tags/release"),
		"gb" | "mb" => Some("branches/guests"),
		"gt" | "mt" => Some("tags/guests"),
		_ => None,
	}
}

fn env_var(name: &str) -> Result<String> {
	std::env::var(name).map_err(|_| SvnshimError::MissingEnvVar {
		name: name.to_string(),
	})
}

/// Resolve `before` (a URL or working-copy path, possibly with a trailing
/// slash) to its repository URL.
fn url_for(before: &str, resolver: &dyn WcResolver) -> Result<String> {
	if is_url(before) {
		return Ok(before.to_string());
	}
	let path = before.trim_end_matches('/');
	let path = if path.is_empty() { "." } else { path };
	resolver.wc_url(path)
}

fn resolve_keyword(key: &str, before: &str, resolver: &dyn WcResolver) -> Result<String> {
	match key {
		"pr" => env_var("P"),
		"pp" => env_var("PP"),
		"ws" => {
			let base = url_for(before, resolver)?;
			let (ws_head, ws_middle, _ws_tail) = split(&base);
			let mut middle = if ws_middle.is_empty() {
				"trunk".to_string()
			} else {
				ws_middle.to_string()
			};
			middle.push_str("/workspace");
			Ok(join(ws_head, &middle, ""))
		}
		key => {
			let suffix = head_suffix(key).ok_or_else(|| SvnshimError::UnknownKeyword {
				keyword: key.to_string(),
			})?;
			let base = url_for(before, resolver)?;
			let url = join(head(&base), suffix, "");
			if key == "mb" || key == "mt" {
				Ok(join(&url, &env_var("USER")?, ""))
			} else {
				Ok(url)
			}
		}
	}
}

/// Rewrite a URL-like argument until no alias, embedded absolute URL, or
/// keyword rule applies, failing on undefined aliases, unknown keywords,
/// and rewrite cycles.
pub fn map_url(
	input: &str,
	aliases: &HashMap<String, String>,
	resolver: &dyn WcResolver,
) -> Result<String> {
	let mut url = input.to_string();
	let mut history: HashSet<String> = HashSet::new();
	debug!("mapping {url:?}");

	loop {
		let next = if let Some(caps) = ALIAS_RE.captures(&url) {
			let name = &caps["alias"];
			let target = aliases.get(name).ok_or_else(|| SvnshimError::UndefinedAlias {
				name: name.to_string(),
			})?;
			format!("{}{}", target, &caps["after"])
		} else if let Some(caps) = ABS_URL_RE.captures(&url) {
			caps["url"].to_string()
		} else if let Some(caps) = KEYWORD_RE.captures(&url) {
			let resolved = resolve_keyword(&caps["key"], &caps["before"], resolver)?;
			join(&resolved, "", &caps["after"])
		} else {
			break;
		};

		if !history.insert(next.clone()) {
			return Err(SvnshimError::MappingCycle { url: next });
		}
		url = next;
		debug!("        {url:?}");
	}

	debug!("    ==> {url:?}");
	Ok(url)
}
