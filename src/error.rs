use std::path::PathBuf;

/// Library-level structured errors for svnshim.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum SvnshimError {
	#[error("missing environment variable {name}")]
	MissingEnvVar { name: String },

	#[error("failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write config file: {path}")]
	ConfigWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("could not determine the user configuration directory")]
	ConfigDirNotFound,

	#[error("invalid color {color:?} for style {style:?} in config")]
	InvalidColor { style: String, color: String },

	#[error("invalid number of colors specified for {style:?} in config")]
	InvalidColorSpec { style: String },

	#[error("undefined alias {name:?}")]
	UndefinedAlias { name: String },

	#[error("unknown keyword '{keyword}:' in URL")]
	UnknownKeyword { keyword: String },

	#[error("mapping loop for URL {url:?}")]
	MappingCycle { url: String },

	#[error("invalid subversion path {path:?}")]
	InvalidPath { path: String },

	#[error("invalid switch {switch:?}")]
	InvalidSwitch { switch: String },

	#[error("switch {switch} takes no arguments")]
	SwitchTakesNoArgument { switch: String },

	#[error("switch {switch} requires {expected} argument(s)")]
	SwitchMissingArgument { switch: String, expected: usize },

	#[error("{message}")]
	Usage { message: String },

	#[error("failing exit code {code} for external command:\n  {command}")]
	ExternalFailure { command: String, code: i32 },

	#[error("failed to run external command: {command}")]
	CommandSpawn {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("output sink closed")]
	OutputClosed,

	#[error("interrupted")]
	Interrupted,

	#[error("{context}")]
	Io {
		context: String,
		#[source]
		source: std::io::Error,
	},
}

impl SvnshimError {
	/// Usage errors carry a preformatted message for the operator.
	pub fn usage(message: impl Into<String>) -> Self {
		SvnshimError::Usage {
			message: message.into(),
		}
	}
}

/// Result type alias using SvnshimError.
pub type Result<T> = std::result::Result<T, SvnshimError>;
