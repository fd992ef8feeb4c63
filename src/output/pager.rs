use crate::config::PagerSection;
use std::process::{Child, Command, Stdio};

/// Assumed when neither SVN_PAGER, the config, nor PAGER names one.
pub const DEFAULT_PAGER: &str = "less -FKRX";

/// Resolved pager behavior for one invocation.
#[derive(Debug, Clone)]
pub struct PagerSettings {
	/// Pager enabled in config.
	pub enabled: bool,

	/// Resolved pager command line.
	pub cmd: String,

	/// Feed the command line to `sh -c` instead of splitting it.
	pub use_shell: bool,

	/// Stdout is a terminal and `--no-pager` was not given.
	pub wanted: bool,
}

impl PagerSettings {
	/// Resolve the pager command: SVN_PAGER beats the config `cmd`, which
	/// beats PAGER, which beats the built-in default.
	pub fn resolve(section: &PagerSection, wanted: bool) -> Self {
		let cmd = std::env::var("SVN_PAGER")
			.ok()
			.or_else(|| section.cmd.clone())
			.or_else(|| std::env::var("PAGER").ok())
			.unwrap_or_else(|| DEFAULT_PAGER.to_string());

		PagerSettings {
			enabled: section.enabled,
			cmd,
			use_shell: section.use_shell,
			wanted,
		}
	}

	pub fn should_attach(&self) -> bool {
		self.wanted && self.enabled
	}
}

/// Spawn the pager with a piped stdin. A pager that is misconfigured or
/// missing is not an error; output simply stays on stdout.
pub(crate) fn spawn_pager(settings: &PagerSettings) -> Option<Child> {
	let mut command = if settings.use_shell {
		let mut command = Command::new("sh");
		command.arg("-c").arg(&settings.cmd);
		command
	} else {
		let mut parts = settings.cmd.split_whitespace();
		let program = parts.next()?;
		let mut command = Command::new(program);
		command.args(parts);
		command
	};

	match command.stdin(Stdio::piped()).spawn() {
		Ok(child) => Some(child),
		Err(err) => {
			log::warn!("failed to start pager {:?}: {err}", settings.cmd);
			None
		}
	}
}
