use regex::Regex;
use std::sync::LazyLock;

/// Matches the structural middle of a repository URL: `trunk`, or a
/// `tags`/`branches` path (optionally under `guests/<user>`) followed by a
/// name. The lazy head finds the leftmost such occurrence.
static SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^(?P<head>.*?/)(?P<middle>trunk|(?:tags|branches)(?:/guests/[^/@]+)?/[^/@]+)(?P<tail>.*)$",
	)
	.expect("static regex")
});

static PEG_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(.*)(@\d+)$").expect("static regex"));

static SCHEME_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\w+://").expect("static regex"));

/// True when the string is a repository URL rather than a working-copy path.
pub fn is_url(path: &str) -> bool {
	SCHEME_RE.is_match(path)
}

/// Split a trailing `@N` peg revision marker off a URL.
///
/// The peg (including its `@`) is returned separately, or empty when the
/// URL carries none.
pub fn split_peg(url: &str) -> (&str, &str) {
	match PEG_RE.captures(url) {
		Some(caps) => {
			let base = caps.get(1).map_or("", |m| m.as_str());
			let peg = caps.get(2).map_or("", |m| m.as_str());
			(base, peg)
		}
		None => (url, ""),
	}
}

/// Split a URL into (head, middle, tail).
///
/// If no middle can be found, returns `(url, "", "")`. Otherwise:
/// - head always ends with `/`;
/// - middle has no slashes on either side;
/// - tail may start with `/` or `@`, or may be empty;
/// - only the tail may contain a peg revision.
pub fn split(url: &str) -> (&str, &str, &str) {
	match SPLIT_RE.captures(url) {
		Some(caps) => {
			let head = caps.name("head").map_or("", |m| m.as_str());
			let middle = caps.name("middle").map_or("", |m| m.as_str());
			let tail = caps.name("tail").map_or("", |m| m.as_str());
			(head, middle, tail)
		}
		None => (url, "", ""),
	}
}

/// The head of a URL (everything before the structural middle).
pub fn head(url: &str) -> &str {
	split(url).0
}

/// The tail of a URL (everything after the structural middle).
pub fn tail(url: &str) -> &str {
	split(url).2
}

/// Rejoin URL parts, normalizing separator slashes.
///
/// Middle and tail are stripped of surrounding slashes; exactly one `/` is
/// inserted between head and middle when needed, and the tail attaches
/// directly when it starts with `@` (peg revision), else via a `/`.
pub fn join(head: &str, middle: &str, tail: &str) -> String {
	let mut url = head.to_string();
	let middle = middle.trim_matches('/');
	let tail = tail.trim_matches('/');
	if !middle.is_empty() {
		if !url.ends_with('/') {
			url.push('/');
		}
		url.push_str(middle);
	}
	if !tail.is_empty() {
		if tail.starts_with('@') || url.ends_with('/') {
			url.push_str(tail);
		} else {
			url.push('/');
			url.push_str(tail);
		}
	}
	url
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_split_trunk() {
		assert_eq!(
			split("http://server/repo/trunk/comp"),
			("http://server/repo/", "trunk", "/comp")
		);
	}

	#[test]
	fn test_split_tags_and_branches() {
		assert_eq!(
			split("http://server/repo/tags/v1.0"),
			("http://server/repo/", "tags/v1.0", "")
		);
		assert_eq!(
			split("http://server/repo/branches/feature/src"),
			("http://server/repo/", "branches/feature", "/src")
		);
	}

	#[test]
	fn test_split_guest_branches() {
		assert_eq!(
			split("http://server/repo/branches/guests/bob/feature/src"),
			("http://server/repo/", "branches/guests/bob/feature", "/src")
		);
		assert_eq!(
			split("http://server/repo/tags/guests/bob/snap"),
			("http://server/repo/", "tags/guests/bob/snap", "")
		);
	}

	#[test]
	fn test_split_finds_leftmost_middle() {
		assert_eq!(
			split("http://server/trunk/branches/x"),
			("http://server/", "trunk", "/branches/x")
		);
	}

	#[test]
	fn test_split_without_middle() {
		assert_eq!(split("http://server/repo"), ("http://server/repo", "", ""));
		assert_eq!(split("plainpath"), ("plainpath", "", ""));
	}

	#[test]
	fn test_split_keeps_peg_in_tail() {
		assert_eq!(
			split("http://server/repo/trunk/comp@123"),
			("http://server/repo/", "trunk", "/comp@123")
		);
	}

	#[test]
	fn test_split_join_round_trip() {
		for url in [
			"http://server/repo/trunk/comp",
			"http://server/repo/tags/v1.0",
			"http://server/repo/branches/guests/bob/feature/src/lib.rs",
			"svn://host/r/trunk@55",
		] {
			let (head, middle, tail) = split(url);
			assert_ne!(middle, "", "expected a middle in {url}");
			assert_eq!(join(head, middle, tail), url);
		}
	}

	#[test]
	fn test_join_inserts_single_slash() {
		assert_eq!(join("http://server/repo", "trunk", ""), "http://server/repo/trunk");
		assert_eq!(
			join("http://server/repo/", "/trunk/", "comp"),
			"http://server/repo/trunk/comp"
		);
	}

	#[test]
	fn test_join_attaches_peg_directly() {
		assert_eq!(
			join("http://server/repo/", "trunk", "@55"),
			"http://server/repo/trunk@55"
		);
	}

	#[test]
	fn test_join_empty_middle() {
		assert_eq!(join("http://server/repo", "", "comp"), "http://server/repo/comp");
		assert_eq!(join("http://server/repo/", "", ""), "http://server/repo/");
	}

	#[test]
	fn test_split_peg() {
		assert_eq!(split_peg("http://server/x@123"), ("http://server/x", "@123"));
		assert_eq!(split_peg("http://server/x"), ("http://server/x", ""));
		assert_eq!(split_peg("http://server/x@abc"), ("http://server/x@abc", ""));
	}

	#[test]
	fn test_is_url() {
		assert!(is_url("http://server/repo"));
		assert!(is_url("svn://server/repo"));
		assert!(is_url("file:///tmp/repo"));
		assert!(!is_url("some/local/path"));
		assert!(!is_url("C:\\windows\\path"));
	}
}
