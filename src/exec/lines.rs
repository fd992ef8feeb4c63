use std::collections::VecDeque;
use std::io::Read;
use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender, sync_channel};
use std::time::Duration;

const BLOCK_SIZE: usize = 8192;
const QUEUE_BLOCKS: usize = 10;

/// One event from a child's output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
	/// A complete line, newline(s) stripped.
	Full(String),
	/// Text that has sat without a newline past the flush timeout (an
	/// interactive prompt, most likely), or the unterminated remainder at
	/// end-of-stream.
	Partial(String),
}

/// Turns a raw byte stream into line events. A background thread reads
/// blocks into a bounded channel so a full pipe on one stream never blocks
/// the reader of another; the consuming side splits lines and flushes
/// pending partial lines after `partial_timeout`.
#[derive(Debug)]
pub struct LineStream {
	rx: Receiver<Vec<u8>>,
	buf: Vec<u8>,
	pending: VecDeque<LineEvent>,
	partial_timeout: Option<Duration>,
	eof: bool,
}

impl LineStream {
	/// Build a stream over an in-process channel. Exposed for tests; use
	/// [`LineStream::spawn`] for real child streams.
	pub fn new(rx: Receiver<Vec<u8>>, partial_timeout: Option<Duration>) -> Self {
		LineStream {
			rx,
			buf: Vec::new(),
			pending: VecDeque::new(),
			partial_timeout,
			eof: false,
		}
	}

	/// Spawn the reader thread over `reader` and return the line stream.
	pub fn spawn<R: Read + Send + 'static>(
		reader: R,
		partial_timeout: Option<Duration>,
	) -> Self {
		let (tx, rx) = sync_channel(QUEUE_BLOCKS);
		std::thread::spawn(move || read_into_channel(reader, &tx));
		Self::new(rx, partial_timeout)
	}

	fn drain_complete_lines(&mut self) {
		while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
			let rest = self.buf.split_off(pos + 1);
			let mut line = std::mem::replace(&mut self.buf, rest);
			while line.last().is_some_and(|&b| b == b'\n' || b == b'\r') {
				line.pop();
			}
			self.pending
				.push_back(LineEvent::Full(String::from_utf8_lossy(&line).into_owned()));
		}
	}

	/// Flush decodable pending bytes as a partial line, holding back any
	/// incomplete trailing UTF-8 sequence.
	fn take_partial(&mut self) -> Option<String> {
		let valid = match std::str::from_utf8(&self.buf) {
			Ok(text) => text.len(),
			Err(err) => err.valid_up_to(),
		};
		if valid == 0 {
			return None;
		}
		let bytes: Vec<u8> = self.buf.drain(..valid).collect();
		Some(String::from_utf8_lossy(&bytes).into_owned())
	}
}

impl Iterator for LineStream {
	type Item = LineEvent;

	fn next(&mut self) -> Option<LineEvent> {
		loop {
			if let Some(event) = self.pending.pop_front() {
				return Some(event);
			}
			if self.eof {
				return self.take_partial().map(LineEvent::Partial);
			}

			let chunk = match (self.buf.is_empty(), self.partial_timeout) {
				(false, Some(timeout)) => match self.rx.recv_timeout(timeout) {
					Ok(chunk) => Some(chunk),
					Err(RecvTimeoutError::Timeout) => {
						if let Some(text) = self.take_partial() {
							return Some(LineEvent::Partial(text));
						}
						continue;
					}
					Err(RecvTimeoutError::Disconnected) => None,
				},
				_ => self.rx.recv().ok(),
			};

			match chunk {
				Some(bytes) => {
					self.buf.extend_from_slice(&bytes);
					self.drain_complete_lines();
				}
				None => self.eof = true,
			}
		}
	}
}

fn read_into_channel<R: Read>(mut reader: R, tx: &SyncSender<Vec<u8>>) {
	let mut block = [0u8; BLOCK_SIZE];
	loop {
		match reader.read(&mut block) {
			Ok(0) | Err(_) => break,
			Ok(n) => {
				if tx.send(block[..n].to_vec()).is_err() {
					break;
				}
			}
		}
	}
}
