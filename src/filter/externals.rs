use diffy::DiffOptions;
use regex::Regex;
use std::sync::LazyLock;

static EXT_START: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(Name|Modified): svn:externals").expect("static regex"));
static PROP_HEADER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\w+:\s").expect("static regex"));
static POSITION_LINE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^## .* ##$").expect("static regex"));
static OLD_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+- ").expect("static regex"));
static NEW_LINE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s+\+ ").expect("static regex"));

/// Accumulates the old/new sides of an externals property block and
/// re-expresses them as a real unified line diff on flush.
#[derive(Debug)]
pub struct ExtDiffer {
	ignore_space_change: bool,
	side: usize,
	sides: [Vec<String>; 2],
}

impl ExtDiffer {
	pub fn new(ignore_space_change: bool) -> Self {
		ExtDiffer {
			ignore_space_change,
			side: 0,
			sides: [Vec::new(), Vec::new()],
		}
	}

	/// Add one property line. A `- ` marker switches to (and strips for)
	/// the old side, `+ ` to the new side; unmarked lines follow the
	/// currently active side.
	pub fn add_line(&mut self, line: &str) {
		let mut line = line;
		if OLD_LINE.is_match(line) {
			self.side = 0;
			line = &line.trim_start()[2..];
		} else if NEW_LINE.is_match(line) {
			self.side = 1;
			line = &line.trim_start()[2..];
		}
		let line = if self.ignore_space_change {
			line.split_whitespace().collect::<Vec<_>>().join(" ")
		} else {
			line.to_string()
		};
		self.sides[self.side].push(line);
	}

	/// Emit the unified diff of the accumulated sides and reset.
	///
	/// A trailing blank line on the new side is held back and re-emitted
	/// after the diff so property separators survive. Equal sides emit
	/// nothing.
	pub fn flush(&mut self) -> Vec<String> {
		let mut out = Vec::new();

		let extra_line = if self.sides[1].last().is_some_and(|last| last.trim().is_empty()) {
			self.sides[1].pop()
		} else {
			None
		};

		if !self.sides[0].is_empty() || !self.sides[1].is_empty() {
			let old = join_lines(&self.sides[0]);
			let new = join_lines(&self.sides[1]);
			let mut options = DiffOptions::new();
			options
				.set_context_len(0)
				.set_original_filename("Old externals")
				.set_modified_filename("New externals");
			let patch = options.create_patch(&old, &new);
			if !patch.hunks().is_empty() {
				out.extend(patch.to_string().lines().map(str::to_string));
			}
		}

		self.side = 0;
		self.sides = [Vec::new(), Vec::new()];

		if let Some(line) = extra_line {
			out.push(line);
		}
		out
	}
}

fn join_lines(lines: &[String]) -> String {
	if lines.is_empty() {
		String::new()
	} else {
		let mut text = lines.join("\n");
		text.push('\n');
		text
	}
}

/// State machine that recognizes externals property blocks within a diff
/// stream and routes their lines through an [`ExtDiffer`].
#[derive(Debug)]
pub struct ExternalsMerger {
	differ: ExtDiffer,
	in_ext: bool,
	expecting_first_line: bool,
}

impl ExternalsMerger {
	pub fn new(ignore_space_change: bool) -> Self {
		ExternalsMerger {
			differ: ExtDiffer::new(ignore_space_change),
			in_ext: false,
			expecting_first_line: false,
		}
	}

	pub fn push(&mut self, line: String) -> Vec<String> {
		if self.in_ext {
			let expecting_first = self.expecting_first_line;
			self.expecting_first_line = false;
			if PROP_HEADER.is_match(&line) {
				let mut out = self.differ.flush();
				out.push(line);
				self.in_ext = false;
				out
			} else if expecting_first && POSITION_LINE.is_match(&line) {
				// The client already produced a line-level property diff
				// (position indicator like "## -1 +1,2 ##" on the first
				// line); no re-diffing needed.
				self.in_ext = false;
				vec![line]
			} else {
				self.differ.add_line(&line);
				Vec::new()
			}
		} else if EXT_START.is_match(&line) {
			self.in_ext = true;
			self.expecting_first_line = true;
			vec![line]
		} else {
			vec![line]
		}
	}

	pub fn finish(&mut self) -> Vec<String> {
		if self.in_ext {
			self.in_ext = false;
			self.differ.flush()
		} else {
			Vec::new()
		}
	}
}
