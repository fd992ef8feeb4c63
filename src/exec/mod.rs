//! Subprocess execution for svnshim.
//!
//! This module handles:
//! - Running the wrapped client with inherited or piped stdio
//! - Independent reader threads per output stream with bounded queues
//! - Signal hygiene: children get default dispositions back, the parent
//!   shields itself from SIGINT while a child runs
//! - Exit status classification (failure vs. interruption)

pub mod info;
pub mod lines;

pub use lines::{LineEvent, LineStream};

use crate::error::{Result, SvnshimError};
use crate::filter::LineFilter;
use crate::output::Output;
use crate::session::{Report, Session};
use log::debug;
use regex::Regex;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

/// How long an unterminated line (an interactive prompt) may sit before it
/// is flushed to the display.
pub const PARTIAL_LINE_TIMEOUT: Duration = Duration::from_millis(200);

/// Restores the default dispositions for the signals the Rust runtime (or
/// our parent) may have left ignored, so the child is interruptible and
/// dies properly on a closed pipe.
#[cfg(unix)]
fn restore_child_signals(command: &mut Command) {
	use std::os::unix::process::CommandExt;
	// SAFETY: pre_exec runs post-fork; sigaction is async-signal-safe.
	unsafe {
		command.pre_exec(|| {
			use nix::sys::signal::{SigHandler, Signal, signal};
			for sig in [Signal::SIGINT, Signal::SIGPIPE, Signal::SIGXFSZ] {
				let _ = signal(sig, SigHandler::SigDfl);
			}
			Ok(())
		});
	}
}

#[cfg(not(unix))]
fn restore_child_signals(_command: &mut Command) {}

/// While alive, the parent ignores SIGINT so an interrupt reaches only the
/// child (which restored its default handling); the previous disposition
/// comes back on drop.
pub struct SigintShield {
	#[cfg(unix)]
	previous: Option<nix::sys::signal::SigHandler>,
}

impl SigintShield {
	#[cfg(unix)]
	pub fn new() -> Self {
		use nix::sys::signal::{SigHandler, Signal, signal};
		// SAFETY: installing SIG_IGN for SIGINT is process-global but
		// reverted on drop; no handler code runs.
		let previous = unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) }.ok();
		SigintShield { previous }
	}

	#[cfg(not(unix))]
	pub fn new() -> Self {
		SigintShield {}
	}

	#[cfg(unix)]
	fn restore(&self) {
		use nix::sys::signal::{Signal, signal};
		if let Some(previous) = self.previous {
			// SAFETY: restores the disposition captured in new().
			let _ = unsafe { signal(Signal::SIGINT, previous) };
		}
	}
}

impl Default for SigintShield {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for SigintShield {
	fn drop(&mut self) {
		#[cfg(unix)]
		self.restore();
	}
}

fn base_command(ctx: &Session, args: &[String]) -> Command {
	let mut command = Command::new(&ctx.svn);
	command.args(args);
	restore_child_signals(&mut command);
	command
}

fn classify_status(status: ExitStatus, command_line: String) -> Result<()> {
	#[cfg(unix)]
	{
		use std::os::unix::process::ExitStatusExt;
		if status.signal() == Some(nix::libc::SIGINT) {
			return Err(SvnshimError::Interrupted);
		}
	}
	if status.success() {
		Ok(())
	} else {
		Err(SvnshimError::ExternalFailure {
			command: command_line,
			code: status.code().unwrap_or(-1),
		})
	}
}

/// Run the wrapped client with inherited stdio (interactive commands,
/// pass-through). Non-zero exit is an error carrying the command line.
pub fn passthrough(ctx: &Session, args: &[String]) -> Result<()> {
	let command_line = ctx.command_line(args);
	debug!("running {command_line}");
	let mut command = base_command(ctx, args);
	command
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	let _shield = SigintShield::new();
	let status = command.status().map_err(|source| SvnshimError::CommandSpawn {
		command: command_line.clone(),
		source,
	})?;
	classify_status(status, command_line)
}

struct StreamingChild {
	child: Child,
	stderr_relay: JoinHandle<String>,
	command_line: String,
}

fn spawn_streaming(
	ctx: &Session,
	out: &Output,
	args: &[String],
	partial_timeout: Option<Duration>,
) -> Result<(StreamingChild, LineStream)> {
	let command_line = ctx.command_line(args);
	debug!("running {command_line}");
	let mut command = base_command(ctx, args);
	command
		.stdin(Stdio::inherit())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped());

	let mut child = command.spawn().map_err(|source| SvnshimError::CommandSpawn {
		command: command_line.clone(),
		source,
	})?;

	let stdout = child.stdout.take().expect("child stdout is piped");
	let stderr = child.stderr.take().expect("child stderr is piped");

	let relay_out = out.clone();
	let stderr_relay = std::thread::spawn(move || {
		let mut collected = String::new();
		for event in LineStream::spawn(stderr, Some(PARTIAL_LINE_TIMEOUT)) {
			match event {
				LineEvent::Full(line) => {
					collected.push_str(&line);
					collected.push('\n');
					let _ = relay_out.write_err_ln(&line);
				}
				LineEvent::Partial(text) => {
					collected.push_str(&text);
					let _ = relay_out.write_err_raw(&text);
				}
			}
		}
		collected
	});

	let streaming = StreamingChild {
		child,
		stderr_relay,
		command_line,
	};
	Ok((streaming, LineStream::spawn(stdout, partial_timeout)))
}

fn finish_streaming(streaming: StreamingChild, report: &Report) -> Result<()> {
	let StreamingChild {
		mut child,
		stderr_relay,
		command_line,
	} = streaming;

	let stderr_text = stderr_relay.join().unwrap_or_default();
	if !stderr_text.is_empty() {
		report.add_stderr_text(&stderr_text);
	}

	let status = child.wait().map_err(|source| SvnshimError::Io {
		context: format!("failed to wait for {command_line}"),
		source,
	})?;
	classify_status(status, command_line)
}

/// Run the wrapped client, classify its output through `filter`, and write
/// the styled lines to `out`.
///
/// Lines matching `noise` are dropped. Partial lines (interactive prompts)
/// and their continuations bypass filtering entirely and pass through raw
/// so prompt fidelity is preserved; classification resumes at the next
/// clean line boundary. Stderr is relayed live in the warning style and
/// totaled into the report.
pub fn run_filtered(
	ctx: &Session,
	report: &Report,
	out: &Output,
	args: &[String],
	noise: Option<&Regex>,
	filter: &mut dyn LineFilter,
) -> Result<()> {
	let _shield = SigintShield::new();
	let (streaming, stdout) = spawn_streaming(ctx, out, args, Some(PARTIAL_LINE_TIMEOUT))?;

	let mut within_partial_line = false;
	for event in stdout {
		match event {
			LineEvent::Partial(text) => {
				out.write_raw(&text)?;
				within_partial_line = true;
			}
			LineEvent::Full(line) => {
				if within_partial_line {
					out.write_raw(&line)?;
					out.write_raw("\n")?;
					within_partial_line = false;
				} else if noise.is_none_or(|re| !re.is_match(&line)) {
					for classified in filter.push(line) {
						out.write_classified(&classified)?;
					}
				}
			}
		}
	}
	for classified in filter.finish() {
		out.write_classified(&classified)?;
	}

	finish_streaming(streaming, report)
}

/// Run the wrapped client and collect its (noise-filtered) stdout lines
/// instead of displaying them. Stderr is still relayed and totaled.
pub fn capture_lines(
	ctx: &Session,
	report: &Report,
	out: &Output,
	args: &[String],
	noise: Option<&Regex>,
) -> Result<Vec<String>> {
	let _shield = SigintShield::new();
	let (streaming, stdout) = spawn_streaming(ctx, out, args, None)?;

	let mut lines = Vec::new();
	for event in stdout {
		let (LineEvent::Full(line) | LineEvent::Partial(line)) = event;
		if noise.is_none_or(|re| !re.is_match(&line)) {
			lines.push(line);
		}
	}

	finish_streaming(streaming, report)?;
	Ok(lines)
}
