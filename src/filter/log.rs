use crate::filter::{ClassifiedLine, LineFilter, Span, StyleTag};
use regex::Regex;
use std::sync::LazyLock;

static LOG_HEADER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(r\d+) \| (.*) \| (.*) \| (\d+ lines?)$").expect("static regex")
});

const SEPARATOR_LEN: usize = 72;

/// Colorizes `log` output: record headers split into styled fields, the
/// 72-dash record separator, and everything else as log text.
#[derive(Debug, Default)]
pub struct LogFilter;

impl LogFilter {
	pub fn new() -> Self {
		Self::default()
	}
}

impl LineFilter for LogFilter {
	fn push(&mut self, line: String) -> Vec<ClassifiedLine> {
		if let Some(caps) = LOG_HEADER.captures(&line) {
			let fields = [
				(&caps[1], StyleTag::LogRev),
				(&caps[2], StyleTag::LogCommitter),
				(&caps[3], StyleTag::LogDate),
				(&caps[4], StyleTag::LogNumLines),
			];
			let mut spans = Vec::new();
			for (i, (text, tag)) in fields.iter().enumerate() {
				if i > 0 {
					spans.push(Span {
						text: " ".to_string(),
						tag: StyleTag::Plain,
					});
					spans.push(Span {
						text: "|".to_string(),
						tag: StyleTag::LogFieldSeparator,
					});
					spans.push(Span {
						text: " ".to_string(),
						tag: StyleTag::Plain,
					});
				}
				spans.push(Span {
					text: (*text).to_string(),
					tag: *tag,
				});
			}
			vec![ClassifiedLine { spans }]
		} else if line.len() == SEPARATOR_LEN && line.bytes().all(|b| b == b'-') {
			vec![ClassifiedLine::solid(line, StyleTag::LogSeparator)]
		} else {
			vec![ClassifiedLine::solid(line, StyleTag::LogText)]
		}
	}
}
