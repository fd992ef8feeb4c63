use crate::config::Config;
use crate::error::Result;
use crate::filter::StyleTag;
use crate::output::{ColorScheme, Output, PagerSettings};
use crate::switches::{ColorMode, WrapperOptions};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Immutable per-invocation context: the wrapped executable, the color
/// scheme, the alias table, and the resolved pager behavior. Built once at
/// startup and passed by reference, so classification and mapping stay
/// independent of process-global state.
#[derive(Debug)]
pub struct Session {
	pub svn: PathBuf,
	pub scheme: ColorScheme,
	pub aliases: HashMap<String, String>,
	pub pager: PagerSettings,
	pub config_path: PathBuf,
}

impl Session {
	pub fn new(config: Config, config_path: PathBuf, options: &WrapperOptions) -> Result<Self> {
		let isatty = console::Term::stdout().is_term();
		let color_enabled = match options.color {
			ColorMode::On => true,
			ColorMode::Off => false,
			ColorMode::Auto => isatty,
		};
		let scheme = ColorScheme::from_config(&config.colors, color_enabled)?;
		let pager = PagerSettings::resolve(&config.pager, isatty && options.use_pager);
		let svn = options
			.svn
			.clone()
			.unwrap_or_else(|| PathBuf::from("svn"));

		Ok(Session {
			svn,
			scheme,
			aliases: config.aliases,
			pager,
			config_path,
		})
	}

	/// The full command line for error reporting.
	pub fn command_line(&self, args: &[String]) -> String {
		let mut parts = vec![self.svn.to_string_lossy().into_owned()];
		parts.extend(args.iter().cloned());
		parts.join(" ")
	}
}

#[derive(Debug, Default)]
struct ReportInner {
	conflicts: Vec<String>,
	warnings: Vec<String>,
	stderr_chars: usize,
}

/// Accumulated notifications, displayed once just before exit. Interior
/// mutability keeps the collection sites (classifiers, stderr relays, the
/// top-level handler) free of borrow plumbing.
#[derive(Debug, Default)]
pub struct Report {
	inner: RefCell<ReportInner>,
}

impl Report {
	pub fn add_conflicts(&self, lines: Vec<String>) {
		self.inner.borrow_mut().conflicts.extend(lines);
	}

	pub fn add_warning(&self, line: impl Into<String>) {
		self.inner.borrow_mut().warnings.push(line.into());
	}

	pub fn add_stderr_text(&self, text: &str) {
		self.inner.borrow_mut().stderr_chars += text.chars().count();
	}

	/// Write the end-of-run summary through the sink. A closed sink (pager
	/// quit early) silently ends the summary; the operator left already.
	pub fn display(&self, out: &Output) {
		let inner = self.inner.borrow();
		let write = |tag: StyleTag, line: &str| out.write_tagged_ln(tag, line).is_ok();

		if !inner.conflicts.is_empty() {
			if !write(
				StyleTag::StatusConflict,
				&format!("Total conflicts: {}", inner.conflicts.len()),
			) {
				return;
			}
			for line in &inner.conflicts {
				if !write(StyleTag::StatusConflict, line) {
					return;
				}
			}
		}
		if !inner.warnings.is_empty() {
			if !write(
				StyleTag::Warning,
				&format!("Total svn warnings: {}", inner.warnings.len()),
			) {
				return;
			}
			for line in &inner.warnings {
				if !write(StyleTag::Warning, line) {
					return;
				}
			}
		}
		if inner.stderr_chars > 0 {
			write(
				StyleTag::Warning,
				&format!(
					"Total characters of stderr from svn: {}",
					inner.stderr_chars
				),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_report_displays_conflicts_and_warnings() {
		let report = Report::default();
		report.add_conflicts(vec!["C      baz.txt".to_string()]);
		report.add_warning("svnshim: something odd");
		report.add_stderr_text("warning text\n");

		let out = Output::buffer(ColorScheme::disabled());
		report.display(&out);
		let text = out.take_buffer();
		assert!(text.contains("Total conflicts: 1"));
		assert!(text.contains("C      baz.txt"));
		assert!(text.contains("Total svn warnings: 1"));
		assert!(text.contains("svnshim: something odd"));
		assert!(text.contains("Total characters of stderr from svn: 13"));
	}

	#[test]
	fn test_empty_report_displays_nothing() {
		let report = Report::default();
		let out = Output::buffer(ColorScheme::disabled());
		report.display(&out);
		assert_eq!(out.take_buffer(), "");
	}
}
