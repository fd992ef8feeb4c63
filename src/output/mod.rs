//! Output rendering for svnshim.
//!
//! This module handles:
//! - The shared output sink (stdout, or a pager once attached)
//! - Style rendering through the per-invocation color scheme
//! - Converting a closed downstream pipe into the benign "output closed"
//!   condition
//! - Pager spawn and ordered teardown

pub mod color;
pub mod pager;

pub use color::ColorScheme;
pub use pager::{PagerSettings, DEFAULT_PAGER};

use crate::error::{Result, SvnshimError};
use crate::filter::{ClassifiedLine, StyleTag};
use std::io::Write;
use std::process::{Child, ChildStdin};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
enum Dest {
	Stdout,
	Pager {
		stdin: Option<ChildStdin>,
		child: Child,
	},
	Buffer(Vec<u8>),
}

#[derive(Debug)]
struct SinkInner {
	dest: Dest,
	closed: bool,
}

/// Shared handle to the output sink. Clones write to the same destination,
/// so the stderr relay thread and the main thread interleave at line
/// granularity rather than byte granularity.
#[derive(Debug, Clone)]
pub struct Output {
	scheme: ColorScheme,
	inner: Arc<Mutex<SinkInner>>,
}

impl Output {
	pub fn stdout(scheme: ColorScheme) -> Self {
		Output {
			scheme,
			inner: Arc::new(Mutex::new(SinkInner {
				dest: Dest::Stdout,
				closed: false,
			})),
		}
	}

	/// Collects output in memory. Used by unit tests.
	pub fn buffer(scheme: ColorScheme) -> Self {
		Output {
			scheme,
			inner: Arc::new(Mutex::new(SinkInner {
				dest: Dest::Buffer(Vec::new()),
				closed: false,
			})),
		}
	}

	/// Drain the buffered output. Empty unless constructed with
	/// [`Output::buffer`].
	pub fn take_buffer(&self) -> String {
		let mut inner = self.lock();
		match &mut inner.dest {
			Dest::Buffer(buf) => String::from_utf8_lossy(&std::mem::take(buf)).into_owned(),
			_ => String::new(),
		}
	}

	pub fn scheme(&self) -> &ColorScheme {
		&self.scheme
	}

	pub fn paint(&self, tag: StyleTag, text: &str) -> String {
		self.scheme.paint(tag, text)
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, SinkInner> {
		self.inner.lock().expect("output sink lock poisoned")
	}

	fn write_to_dest(&self, text: &str, err_stream: bool) -> Result<()> {
		let mut inner = self.lock();
		if inner.closed {
			return Err(SvnshimError::OutputClosed);
		}
		let result = match &mut inner.dest {
			Dest::Stdout => {
				if err_stream {
					let mut stderr = std::io::stderr().lock();
					stderr
						.write_all(text.as_bytes())
						.and_then(|()| stderr.flush())
				} else {
					let mut stdout = std::io::stdout().lock();
					stdout
						.write_all(text.as_bytes())
						.and_then(|()| stdout.flush())
				}
			}
			Dest::Pager { stdin: Some(w), .. } => {
				w.write_all(text.as_bytes()).and_then(|()| w.flush())
			}
			Dest::Pager { stdin: None, .. } => {
				inner.closed = true;
				return Err(SvnshimError::OutputClosed);
			}
			Dest::Buffer(buf) => {
				buf.extend_from_slice(text.as_bytes());
				Ok(())
			}
		};
		match result {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
				inner.closed = true;
				Err(SvnshimError::OutputClosed)
			}
			Err(err) => Err(SvnshimError::Io {
				context: "failed to write output".to_string(),
				source: err,
			}),
		}
	}

	/// Write text exactly as given (partial lines, prompts).
	pub fn write_raw(&self, text: &str) -> Result<()> {
		self.write_to_dest(text, false)
	}

	pub fn write_ln(&self, line: &str) -> Result<()> {
		self.write_to_dest(&format!("{line}\n"), false)
	}

	pub fn write_tagged_ln(&self, tag: StyleTag, line: &str) -> Result<()> {
		self.write_ln(&self.paint(tag, line))
	}

	pub fn write_classified(&self, line: &ClassifiedLine) -> Result<()> {
		let mut rendered = String::new();
		for span in &line.spans {
			rendered.push_str(&self.paint(span.tag, &span.text));
		}
		rendered.push('\n');
		self.write_to_dest(&rendered, false)
	}

	/// Relay a line of the child's stderr, warning-styled. Goes to our
	/// stderr normally, or into the pager once one is attached.
	pub fn write_err_ln(&self, line: &str) -> Result<()> {
		let painted = self.paint(StyleTag::Warning, line);
		self.write_to_dest(&format!("{painted}\n"), true)
	}

	/// Relay a partial stderr line (no newline yet).
	pub fn write_err_raw(&self, text: &str) -> Result<()> {
		let painted = self.paint(StyleTag::Warning, text);
		self.write_to_dest(&painted, true)
	}

	/// Attach a pager if the settings allow one and none is attached yet.
	/// All subsequent output (stdout and relayed stderr) routes through it.
	pub fn attach_pager(&self, settings: &PagerSettings) {
		if !settings.should_attach() {
			return;
		}
		let mut inner = self.lock();
		if !matches!(inner.dest, Dest::Stdout) {
			return;
		}
		if let Some(mut child) = pager::spawn_pager(settings) {
			let stdin = child.stdin.take();
			inner.dest = Dest::Pager { stdin, child };
		}
	}

	/// Tear the sink down: restore stdout as the destination, close the
	/// pager's input, and wait for it to exit. Interrupts are shielded for
	/// the duration so Ctrl-C aimed at the pager does not kill us mid-wait.
	pub fn finish(&self) {
		let dest = {
			let mut inner = self.lock();
			std::mem::replace(&mut inner.dest, Dest::Stdout)
		};
		if let Dest::Pager { stdin, mut child } = dest {
			let _shield = crate::exec::SigintShield::new();
			drop(stdin);
			let _ = child.wait();
		}
	}
}
