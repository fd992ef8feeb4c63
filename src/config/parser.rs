use crate::config::types::Config;
use crate::error::{Result, SvnshimError};
use std::path::{Path, PathBuf};

/// Sample config written on first run. Every setting is commented out; the
/// defaults apply until the operator uncomments something.
pub const SAMPLE_CONFIG: &str = r#"# svnshim configuration.

[aliases]
# Aliases are used at the start of a URL.  They are replaced by their
# aliased value.  When the alias "project1" has been defined, this URL:
#   //project1
# will be replaced by the associated URL, e.g.:
#   http://server/url/for/project1
#
# Define aliases as follows:
## project1 = "http://server/url/for/project1"

[pager]
# The pager is used by several commands to paginate the output.
# Set "enabled" to false to disable use of a pager.
## enabled = true

# Customize which pager to use (along with any desired arguments) via the
# "cmd" setting here, or via the environment variable SVN_PAGER, or via the
# system default specified in the PAGER environment variable.  If none of the
# above are set, then "less -FKRX" will be assumed.
#
# Switches for "less":
#   -F  quit the pager early if output fits on one screen
#   -K  allow Ctrl-C to exit less
#   -R  process color escape sequences
#   -X  don't clear the screen when pager quits
## cmd = "less -FKRX"

# If "use-shell" is true, svnshim will feed "cmd" directly to the shell,
# allowing more complicated commands such as "diff-highlight | less".
# **WARNING** With this enabled, svnshim cannot detect failures of "cmd".
## use-shell = false

[colors]
# Override the built-in color scheme.  Values are "foreground" or
# "foreground,background"; colors are "dark" or "light" plus one of
# black, red, green, yellow, blue, magenta, cyan, white; "default"
# keeps the built-in value.  E.g.:
## statusadded = "lightgreen"
## conflict = "lightwhite,darkred"
"#;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| SvnshimError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| SvnshimError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})?;

	Ok(config)
}

/// Path of the per-user config file, `<config-dir>/svnshim/config.toml`.
///
/// The platform config directory honors `XDG_CONFIG_HOME`.
pub fn config_file_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or(SvnshimError::ConfigDirNotFound)?;
	Ok(config_dir.join("svnshim").join("config.toml"))
}

/// Load the per-user config, creating it with sample contents if absent.
///
/// Returns the parsed config together with the path it came from.
pub fn load_or_create() -> Result<(Config, PathBuf)> {
	let path = config_file_path()?;

	if !path.exists() {
		if let Some(dir) = path.parent() {
			std::fs::create_dir_all(dir).map_err(|source| SvnshimError::ConfigWrite {
				path: dir.to_path_buf(),
				source,
			})?;
		}
		std::fs::write(&path, SAMPLE_CONFIG).map_err(|source| SvnshimError::ConfigWrite {
			path: path.clone(),
			source,
		})?;
	}

	let config = parse_config_file(&path)?;
	Ok((config, path))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(config.aliases.is_empty());
		assert!(config.colors.is_empty());
		assert!(config.pager.enabled);
		assert!(config.pager.cmd.is_none());
		assert!(!config.pager.use_shell);
	}

	#[test]
	fn test_parse_aliases() {
		let content = r#"
[aliases]
proj = "http://server/url/for/project1"
other = "svn://host/other"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.aliases.len(), 2);
		assert_eq!(
			config.aliases.get("proj").map(String::as_str),
			Some("http://server/url/for/project1")
		);
	}

	#[test]
	fn test_parse_pager_section() {
		let content = r#"
[pager]
enabled = false
cmd = "less -R"
use-shell = true
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(!config.pager.enabled);
		assert_eq!(config.pager.cmd.as_deref(), Some("less -R"));
		assert!(config.pager.use_shell);
	}

	#[test]
	fn test_parse_colors() {
		let content = r#"
[colors]
statusadded = "lightgreen"
logrev = "default,darkred"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(
			config.colors.get("statusadded").map(String::as_str),
			Some("lightgreen")
		);
	}

	#[test]
	fn test_parse_malformed_config() {
		let path = PathBuf::from("test.toml");
		let result = parse_config_str("[pager\nenabled = tr", &path);

		assert!(matches!(
			result.unwrap_err(),
			SvnshimError::ConfigParse { .. }
		));
	}

	#[test]
	fn test_sample_config_parses() {
		let path = PathBuf::from("sample.toml");
		let config = parse_config_str(SAMPLE_CONFIG, &path).unwrap();

		// Every sample setting is commented out, so the defaults apply.
		assert!(config.aliases.is_empty());
		assert!(config.pager.enabled);
	}
}
