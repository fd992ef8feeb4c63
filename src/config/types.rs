use serde::Deserialize;
use std::collections::HashMap;

/// Top-level configuration from the per-user `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// URL aliases, triggered by a leading `//name` in an argument.
	#[serde(default)]
	pub aliases: HashMap<String, String>,

	/// Pager behavior for paginating commands.
	#[serde(default)]
	pub pager: PagerSection,

	/// Per-style color overrides, `style = "foreground[,background]"`.
	/// Keys are matched case-insensitively against the built-in style names.
	#[serde(default)]
	pub colors: HashMap<String, String>,
}

/// The `[pager]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PagerSection {
	/// If false, never use a pager.
	#[serde(default = "default_true")]
	pub enabled: bool,

	/// Pager command line. Overridden by SVN_PAGER; overrides PAGER.
	#[serde(default)]
	pub cmd: Option<String>,

	/// If true, feed `cmd` to the shell instead of splitting it ourselves.
	/// Allows pipelines, but pager failures can no longer be detected.
	#[serde(default)]
	pub use_shell: bool,
}

impl Default for PagerSection {
	fn default() -> Self {
		PagerSection {
			enabled: true,
			cmd: None,
			use_shell: false,
		}
	}
}

fn default_true() -> bool {
	true
}
