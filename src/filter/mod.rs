//! Streaming classification of the wrapped client's output.
//!
//! This module handles:
//! - The closed set of style tags attached to output lines
//! - The line-transformer interface shared by all classifiers
//! - Status/update, diff, and log classifiers
//! - Line-level re-diffing of `svn:externals` property blocks

pub mod diff;
pub mod externals;
pub mod log;
pub mod status;

pub use diff::DiffFilter;
pub use externals::{ExtDiffer, ExternalsMerger};
pub use log::LogFilter;
pub use status::{StatusFilter, CHECKOUT_NOISE, STATUS_NOISE, UPDATE_NOISE};

/// Semantic styles attached to classified output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
	DiffAdd,
	DiffRemoved,
	DiffMisc,
	StatusAdded,
	StatusDeleted,
	StatusUpdated,
	StatusConflict,
	StatusModified,
	StatusMerged,
	StatusUntracked,
	Status,
	Info,
	LogRev,
	LogCommitter,
	LogDate,
	LogNumLines,
	LogFieldSeparator,
	LogSeparator,
	LogText,
	Warning,
	Plain,
}

impl StyleTag {
	/// All tags that can carry a configured color.
	pub const ALL: &'static [StyleTag] = &[
		StyleTag::DiffAdd,
		StyleTag::DiffRemoved,
		StyleTag::DiffMisc,
		StyleTag::StatusAdded,
		StyleTag::StatusDeleted,
		StyleTag::StatusUpdated,
		StyleTag::StatusConflict,
		StyleTag::StatusModified,
		StyleTag::StatusMerged,
		StyleTag::StatusUntracked,
		StyleTag::Status,
		StyleTag::Info,
		StyleTag::LogRev,
		StyleTag::LogCommitter,
		StyleTag::LogDate,
		StyleTag::LogNumLines,
		StyleTag::LogFieldSeparator,
		StyleTag::LogSeparator,
		StyleTag::LogText,
		StyleTag::Warning,
	];

	/// Canonical config key for this tag (lowercased style name).
	pub fn config_key(&self) -> &'static str {
		match self {
			StyleTag::DiffAdd => "diffadd",
			StyleTag::DiffRemoved => "diffremoved",
			StyleTag::DiffMisc => "diffmisc",
			StyleTag::StatusAdded => "statusadded",
			StyleTag::StatusDeleted => "statusdeleted",
			StyleTag::StatusUpdated => "statusupdated",
			StyleTag::StatusConflict => "statusconflict",
			StyleTag::StatusModified => "statusmodified",
			StyleTag::StatusMerged => "statusmerged",
			StyleTag::StatusUntracked => "statusuntracked",
			StyleTag::Status => "status",
			StyleTag::Info => "info",
			StyleTag::LogRev => "logrev",
			StyleTag::LogCommitter => "logcommitter",
			StyleTag::LogDate => "logdate",
			StyleTag::LogNumLines => "lognumlines",
			StyleTag::LogFieldSeparator => "logfieldseparator",
			StyleTag::LogSeparator => "logseparator",
			StyleTag::LogText => "logtext",
			StyleTag::Warning => "warning",
			StyleTag::Plain => "plain",
		}
	}
}

/// One styled run of text within a classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
	pub text: String,
	pub tag: StyleTag,
}

/// A classified output line. Most lines carry a single span; log record
/// headers are split into several differently-styled fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
	pub spans: Vec<Span>,
}

impl ClassifiedLine {
	/// A line rendered entirely in one style.
	pub fn solid(text: impl Into<String>, tag: StyleTag) -> Self {
		ClassifiedLine {
			spans: vec![Span {
				text: text.into(),
				tag,
			}],
		}
	}

	/// An unstyled line.
	pub fn plain(text: impl Into<String>) -> Self {
		Self::solid(text, StyleTag::Plain)
	}

	/// The line's text with styling stripped.
	pub fn text(&self) -> String {
		self.spans.iter().map(|s| s.text.as_str()).collect()
	}
}

/// A stateful line transformer: zero or more classified lines out per line
/// in, plus a final flush at end-of-stream.
pub trait LineFilter {
	fn push(&mut self, line: String) -> Vec<ClassifiedLine>;

	fn finish(&mut self) -> Vec<ClassifiedLine> {
		Vec::new()
	}
}

/// Passes every line through unstyled.
#[derive(Debug, Default)]
pub struct PlainFilter;

impl LineFilter for PlainFilter {
	fn push(&mut self, line: String) -> Vec<ClassifiedLine> {
		vec![ClassifiedLine::plain(line)]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classified_line_text_joins_spans() {
		let line = ClassifiedLine {
			spans: vec![
				Span {
					text: "r15".to_string(),
					tag: StyleTag::LogRev,
				},
				Span {
					text: " | ".to_string(),
					tag: StyleTag::Plain,
				},
				Span {
					text: "committer".to_string(),
					tag: StyleTag::LogCommitter,
				},
			],
		};
		assert_eq!(line.text(), "r15 | committer");
	}

	#[test]
	fn test_plain_filter_passes_through() {
		let mut filter = PlainFilter;
		let out = filter.push("anything".to_string());
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].spans[0].tag, StyleTag::Plain);
		assert!(filter.finish().is_empty());
	}
}
