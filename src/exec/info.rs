use crate::error::{Result, SvnshimError};
use crate::exec::capture_lines;
use crate::output::Output;
use crate::session::{Report, Session};
use crate::url::{WcResolver, is_url};
use std::collections::HashMap;

/// Parse `svn info` output into key/value records. Records are separated
/// by lines without a `key: value` shape (normally the blank line after
/// each entry).
pub fn parse_info_records(lines: &[String]) -> Vec<HashMap<String, String>> {
	let mut records = Vec::new();
	let mut record = HashMap::new();
	for line in lines {
		if let Some((key, value)) = line.split_once(':') {
			record.insert(key.trim().to_string(), value.trim().to_string());
		} else if !record.is_empty() {
			records.push(std::mem::take(&mut record));
		}
	}
	if !record.is_empty() {
		records.push(record);
	}
	records
}

/// The repository URL of a path: returned unchanged when it already is a
/// URL, otherwise queried from the working copy via `svn info`.
pub fn get_url(ctx: &Session, report: &Report, out: &Output, path: &str) -> Result<String> {
	if is_url(path) {
		return Ok(path.to_string());
	}
	let args = vec!["info".to_string(), path.to_string()];
	let lines = capture_lines(ctx, report, out, &args, None)?;
	parse_info_records(&lines)
		.first()
		.and_then(|record| record.get("URL").cloned())
		.ok_or_else(|| SvnshimError::InvalidPath {
			path: path.to_string(),
		})
}

/// Production [`WcResolver`] backed by the wrapped client.
pub struct SvnResolver<'a> {
	pub ctx: &'a Session,
	pub report: &'a Report,
	pub out: &'a Output,
}

impl WcResolver for SvnResolver<'_> {
	fn wc_url(&self, path: &str) -> Result<String> {
		get_url(self.ctx, self.report, self.out, path)
	}
}
