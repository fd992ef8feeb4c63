use crate::filter::{ClassifiedLine, LineFilter, StyleTag};
use regex::Regex;
use std::sync::LazyLock;

/// Noise dropped from `status` output before classification.
pub static STATUS_NOISE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^Performing status|^\s*$|^X[ \t]").expect("static regex")
});

/// Noise dropped from `update` and `switch` output. The per-external
/// `At revision` chatter goes; the final `Updated to revision` stays.
pub static UPDATE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^Fetching external|^External |^Updated external|^\s*$|^At revision")
		.expect("static regex")
});

/// Noise dropped from `checkout` output.
pub static CHECKOUT_NOISE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^Fetching external|^\s*$").expect("static regex"));

/// Classifies status/update/checkout lines by their leading character and
/// collects conflict lines for the end-of-run summary.
#[derive(Debug, Default)]
pub struct StatusFilter {
	conflicts: Vec<String>,
}

impl StatusFilter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Drain the conflict lines collected so far.
	pub fn take_conflicts(&mut self) -> Vec<String> {
		std::mem::take(&mut self.conflicts)
	}

	fn classify(&mut self, line: &str) -> StyleTag {
		if line.starts_with("Checked out")
			|| line.starts_with("Updated to revision")
			|| line.starts_with("At revision")
		{
			return StyleTag::Status;
		}
		match line.as_bytes().first() {
			Some(b'A') => StyleTag::StatusAdded,
			Some(b'D') => StyleTag::StatusDeleted,
			Some(b'U') => StyleTag::StatusUpdated,
			Some(b'C') => {
				self.conflicts.push(line.to_string());
				StyleTag::StatusConflict
			}
			Some(b'M') => StyleTag::StatusModified,
			Some(b'G') => StyleTag::StatusMerged,
			Some(b'?') => StyleTag::StatusUntracked,
			_ => StyleTag::Plain,
		}
	}
}

impl LineFilter for StatusFilter {
	fn push(&mut self, line: String) -> Vec<ClassifiedLine> {
		let tag = self.classify(&line);
		vec![ClassifiedLine::solid(line, tag)]
	}
}

/// Split a status line into its seven-column status field and the path.
pub fn split_status(line: &str) -> (&str, &str) {
	let (status, path) = if line.len() >= 7 && line.is_char_boundary(7) {
		line.split_at(7)
	} else {
		(line, "")
	};
	(status, path.strip_prefix(' ').unwrap_or(path))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tag_of(filter: &mut StatusFilter, line: &str) -> StyleTag {
		filter.push(line.to_string())[0].spans[0].tag
	}

	#[test]
	fn test_classify_status_lines() {
		let mut filter = StatusFilter::new();
		assert_eq!(tag_of(&mut filter, "A      foo.txt"), StyleTag::StatusAdded);
		assert_eq!(
			tag_of(&mut filter, "?      bar.txt"),
			StyleTag::StatusUntracked
		);
		assert_eq!(
			tag_of(&mut filter, "C      baz.txt"),
			StyleTag::StatusConflict
		);
		assert_eq!(
			tag_of(&mut filter, "M      mod.txt"),
			StyleTag::StatusModified
		);
		assert_eq!(tag_of(&mut filter, "D      del.txt"), StyleTag::StatusDeleted);
		assert_eq!(tag_of(&mut filter, "U      up.txt"), StyleTag::StatusUpdated);
		assert_eq!(tag_of(&mut filter, "G      merged.txt"), StyleTag::StatusMerged);
	}

	#[test]
	fn test_conflict_lines_are_collected() {
		let mut filter = StatusFilter::new();
		filter.push("C      baz.txt".to_string());
		filter.push("A      ok.txt".to_string());
		assert_eq!(filter.take_conflicts(), vec!["C      baz.txt".to_string()]);
		assert!(filter.take_conflicts().is_empty());
	}

	#[test]
	fn test_info_lines_beat_first_character() {
		let mut filter = StatusFilter::new();
		// "Checked out" starts with 'C' but is not a conflict.
		assert_eq!(
			tag_of(&mut filter, "Checked out revision 7."),
			StyleTag::Status
		);
		assert_eq!(
			tag_of(&mut filter, "Updated to revision 12."),
			StyleTag::Status
		);
		assert_eq!(tag_of(&mut filter, "At revision 12."), StyleTag::Status);
		assert!(filter.take_conflicts().is_empty());
	}

	#[test]
	fn test_unrecognized_lines_stay_plain() {
		let mut filter = StatusFilter::new();
		assert_eq!(tag_of(&mut filter, "some other output"), StyleTag::Plain);
	}

	#[test]
	fn test_split_status() {
		assert_eq!(split_status("A      foo.txt"), ("A      ", "foo.txt"));
		assert_eq!(split_status("?       spaced"), ("?      ", "spaced"));
		assert_eq!(split_status("short"), ("short", ""));
	}

	#[test]
	fn test_noise_regexes() {
		assert!(STATUS_NOISE.is_match("Performing status on external item at 'x'"));
		assert!(STATUS_NOISE.is_match(""));
		assert!(STATUS_NOISE.is_match("X      external-dir"));
		assert!(!STATUS_NOISE.is_match("A      foo.txt"));

		assert!(UPDATE_NOISE.is_match("Fetching external item into 'x'"));
		assert!(UPDATE_NOISE.is_match("At revision 12."));
		assert!(!UPDATE_NOISE.is_match("Updated to revision 12."));

		assert!(CHECKOUT_NOISE.is_match("Fetching external item into 'x'"));
		assert!(!CHECKOUT_NOISE.is_match("Checked out revision 7."));
	}
}
