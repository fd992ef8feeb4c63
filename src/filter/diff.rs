use crate::filter::externals::ExternalsMerger;
use crate::filter::{ClassifiedLine, LineFilter, StyleTag};

/// Colorizes unified diff output, with externals property blocks re-diffed
/// line-by-line first.
#[derive(Debug)]
pub struct DiffFilter {
	merger: ExternalsMerger,
}

impl DiffFilter {
	pub fn new(ignore_space_change: bool) -> Self {
		DiffFilter {
			merger: ExternalsMerger::new(ignore_space_change),
		}
	}

	fn classify(line: String) -> ClassifiedLine {
		let tag = match line.as_bytes().first() {
			Some(b'+') => StyleTag::DiffAdd,
			Some(b'-') => StyleTag::DiffRemoved,
			Some(b'@') => StyleTag::DiffMisc,
			_ => StyleTag::Plain,
		};
		ClassifiedLine::solid(line, tag)
	}
}

impl LineFilter for DiffFilter {
	fn push(&mut self, line: String) -> Vec<ClassifiedLine> {
		self.merger
			.push(line)
			.into_iter()
			.map(Self::classify)
			.collect()
	}

	fn finish(&mut self) -> Vec<ClassifiedLine> {
		self.merger
			.finish()
			.into_iter()
			.map(Self::classify)
			.collect()
	}
}
