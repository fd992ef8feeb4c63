//! Switch tables and argument parsing.
//!
//! Every recognized Subversion switch is classified as taking zero or
//! exactly one trailing value, which lets the parser consume bundled short
//! options (`-Nq`), attached values (`-Ffile`, `--foo=bar`), and separate
//! values correctly. Wrapper-private options are extracted here as well.

use crate::error::{Result, SvnshimError};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::LazyLock;

const ZERO_ARG_SWITCHES: &[&str] = &[
	"--adds-as-modification",
	"--allow-mixed-revisions",
	"--auto-props",
	"--diff",
	"--dry-run",
	"--force",
	"--force-interactive",
	"--force-log",
	"--git",
	"--help",
	"--human-readable",
	"--ignore-ancestry",
	"--ignore-externals",
	"--ignore-keywords",
	"--ignore-properties",
	"--ignore-whitespace",
	"--include-externals",
	"--incremental",
	"--internal-diff",
	"--keep-changelists",
	"--keep-local",
	"--log",
	"--no-auth-cache",
	"--no-auto-props",
	"--no-diff-added",
	"--no-diff-deleted",
	"--no-ignore",
	"--no-newline",
	"--no-unlock",
	"--non-interactive",
	"--non-recursive",
	"--notice-ancestry",
	"--parents",
	"--patch-compatible",
	"--pin-externals",
	"--properties-only",
	"--quiet",
	"--record-only",
	"--recursive",
	"--reintegrate",
	"--relocate",
	"--remove",
	"--remove-added",
	"--remove-ignored",
	"--remove-unversioned",
	"--reverse-diff",
	"--revprop",
	"--show-copies-as-adds",
	"--show-inherited-props",
	"--show-item",
	"--show-passwords",
	"--show-updates",
	"--stop-on-copy",
	"--strict",
	"--summarize",
	"--trust-server-cert",
	"--use-merge-history",
	"--vacuum-pristines",
	"--verbose",
	"--version",
	"--with-all-revprops",
	"--with-no-revprops",
	"--xml",
	"-?",
	"-H",
	"-N",
	"-R",
	"-g",
	"-q",
	"-u",
	"-v",
];

const ONE_ARG_SWITCHES: &[&str] = &[
	"--accept",
	"--change",
	"--changelist",
	"--cl",
	"--config-dir",
	"--config-option",
	"--depth",
	"--diff-cmd",
	"--diff3-cmd",
	"--editor-cmd",
	"--encoding",
	"--extensions",
	"--file",
	"--limit",
	"--message",
	"--native-eol",
	"--new",
	"--old",
	"--password",
	"--revision",
	"--search",
	"--search-and",
	"--set-depth",
	"--show-revs",
	"--strip",
	"--targets",
	"--username",
	"--with-revprop",
	"-F",
	"-c",
	"-l",
	"-m",
	"-r",
	"-x",
];

static SWITCH_ARG_COUNTS: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
	let mut map = HashMap::new();
	for switch in ZERO_ARG_SWITCHES {
		map.insert(*switch, 0);
	}
	for switch in ONE_ARG_SWITCHES {
		map.insert(*switch, 1);
	}
	map
});

/// How many value arguments the switch consumes; unrecognized switches are
/// an error.
pub fn switch_arg_count(switch: &str) -> Result<usize> {
	SWITCH_ARG_COUNTS
		.get(switch)
		.copied()
		.ok_or_else(|| SvnshimError::InvalidSwitch {
			switch: switch.to_string(),
		})
}

/// Color behavior requested on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
	#[default]
	Auto,
	On,
	Off,
}

/// Wrapper-private options, extracted from anywhere in the argument stream.
#[derive(Debug, Clone)]
pub struct WrapperOptions {
	pub color: ColorMode,
	pub use_pager: bool,
	pub debug: bool,
	pub debug_args: bool,
	pub svn: Option<PathBuf>,
}

impl Default for WrapperOptions {
	fn default() -> Self {
		WrapperOptions {
			color: ColorMode::Auto,
			use_pager: true,
			debug: false,
			debug_args: false,
			svn: None,
		}
	}
}

/// The argument stream, split into switch and positional arguments with the
/// wrapper's own options pulled out.
#[derive(Debug, Default)]
pub struct ParsedArgs {
	pub switch_args: Vec<String>,
	pub pos_args: Vec<String>,
	pub options: WrapperOptions,
}

/// Consume one switch (with any bundled switches and attached or trailing
/// values) from the argument stream.
fn parse_switch(switch: &str, args: &mut VecDeque<String>) -> Result<Vec<String>> {
	if switch == "-" {
		return Err(SvnshimError::InvalidSwitch {
			switch: switch.to_string(),
		});
	}

	let mut switch = switch.to_string();
	let mut attached_arg: Option<String> = None;
	if switch.starts_with("--") {
		if let Some(eq) = switch.find('=') {
			attached_arg = Some(switch[eq + 1..].to_string());
			switch.truncate(eq);
		}
	} else {
		// Short switch, possibly bundled or with an attached value.
		if !switch.is_char_boundary(2.min(switch.len())) {
			return Err(SvnshimError::InvalidSwitch { switch });
		}
		let rest = switch.split_off(2.min(switch.len()));
		if !rest.is_empty() {
			if switch_arg_count(&switch)? > 0 {
				attached_arg = Some(rest);
			} else if rest.starts_with('-') {
				return Err(SvnshimError::InvalidSwitch { switch: rest });
			} else {
				// Retain additional bundled switches for the next pass.
				args.push_front(format!("-{rest}"));
			}
		}
	}

	let arg_count = switch_arg_count(&switch)?;
	if let Some(value) = attached_arg {
		if arg_count == 0 {
			return Err(SvnshimError::SwitchTakesNoArgument { switch });
		}
		args.push_front(value);
	}
	if arg_count > args.len() {
		return Err(SvnshimError::SwitchMissingArgument {
			switch,
			expected: arg_count,
		});
	}
	let mut switch_args = vec![switch];
	switch_args.extend(args.drain(..arg_count));
	Ok(switch_args)
}

fn parse_color_mode(args: &mut VecDeque<String>) -> Result<ColorMode> {
	match args.pop_front().as_deref() {
		Some("on") => Ok(ColorMode::On),
		Some("off") => Ok(ColorMode::Off),
		Some("auto") => Ok(ColorMode::Auto),
		_ => Err(SvnshimError::usage(
			"--color requires one of: on, off, auto",
		)),
	}
}

/// Split the raw argument vector into switch and positional arguments,
/// extracting the wrapper's own options along the way.
pub fn parse_args(raw: &[String]) -> Result<ParsedArgs> {
	let mut args: VecDeque<String> = raw.iter().cloned().collect();
	let mut parsed = ParsedArgs::default();

	while let Some(arg) = args.pop_front() {
		match arg.as_str() {
			"--debug-args" => parsed.options.debug_args = true,
			"--debug" => parsed.options.debug = true,
			"--svn" => {
				let path = args.pop_front().ok_or_else(|| {
					SvnshimError::usage("missing argument for switch --svn")
				})?;
				let path = std::path::absolute(&path).map_err(|source| SvnshimError::Io {
					context: format!("failed to resolve --svn path {path:?}"),
					source,
				})?;
				parsed.options.svn = Some(path);
			}
			"--color" => parsed.options.color = parse_color_mode(&mut args)?,
			"--no-pager" => parsed.options.use_pager = false,
			"--ie" => args.push_front("--ignore-externals".to_string()),
			s if s.starts_with('-') => {
				parsed.switch_args.extend(parse_switch(s, &mut args)?);
			}
			_ => parsed.pos_args.push(arg),
		}
	}
	Ok(parsed)
}
