use crate::error::{Result, SvnshimError};
use crate::exec;
use crate::output::Output;
use crate::session::Session;
use std::path::Path;
use walkdir::WalkDir;

/// Merge a raw (non-Subversion) tree into a working copy: copy files in,
/// `svn add` anything new, `svn rm` anything that vanished. Subversion
/// administrative directories are never touched.
///
/// Known limitation: cannot handle a file changing into a directory or
/// vice-versa.
pub fn merge_raw(ctx: &Session, out: &Output, raw_root: &Path, wc_root: &Path) -> Result<()> {
	if !raw_root.is_dir() {
		out.write_ln(&format!("not a directory: {}", raw_root.display()))?;
		return Ok(());
	}
	if paths_equal(raw_root, wc_root) {
		out.write_ln(&format!(
			"cannot merge a tree into itself: {}",
			raw_root.display()
		))?;
		return Ok(());
	}
	if is_svn_dir(raw_root) {
		out.write_ln(&format!(
			"cannot use Subversion working copy: {}",
			raw_root.display()
		))?;
		return Ok(());
	}
	if !is_svn_dir(wc_root) {
		out.write_ln(&format!(
			"not a Subversion working copy: {}",
			wc_root.display()
		))?;
		return Ok(());
	}

	copy_new_entries(ctx, out, raw_root, wc_root)?;
	remove_vanished_entries(ctx, out, raw_root, wc_root)
}

fn is_svn_dir(path: &Path) -> bool {
	path.join(".svn").is_dir()
}

/// Path equality under the platform's case/separator normalization:
/// case-insensitive with unified separators on Windows, exact elsewhere.
pub fn paths_equal(a: &Path, b: &Path) -> bool {
	if cfg!(windows) {
		let normalize =
			|p: &Path| p.to_string_lossy().replace('\\', "/").to_lowercase();
		normalize(a) == normalize(b)
	} else {
		a == b
	}
}

fn is_admin_dir(entry: &walkdir::DirEntry) -> bool {
	entry.file_type().is_dir()
		&& matches!(entry.file_name().to_str(), Some(".svn") | Some("_svn"))
}

fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
	path.strip_prefix(root).unwrap_or(path)
}

fn copy_new_entries(ctx: &Session, out: &Output, raw_root: &Path, wc_root: &Path) -> Result<()> {
	let mut walker = WalkDir::new(raw_root).min_depth(1).into_iter();
	while let Some(entry) = walker.next() {
		let entry = entry.map_err(|err| SvnshimError::Io {
			context: format!("failed to walk {}", raw_root.display()),
			source: err.into(),
		})?;
		if is_admin_dir(&entry) {
			walker.skip_current_dir();
			continue;
		}
		let rel = relative(entry.path(), raw_root).to_path_buf();
		let wc_path = wc_root.join(&rel);
		if entry.file_type().is_dir() {
			if !wc_path.is_dir() {
				out.write_ln(&format!("adding directory {}", rel.display()))?;
				copy_tree(entry.path(), &wc_path)?;
				svn_add(ctx, &wc_path)?;
				walker.skip_current_dir();
			}
		} else if entry.file_type().is_file() {
			let already_added = wc_path.is_file();
			out.write_ln(&format!("copying file {}", rel.display()))?;
			copy_file(entry.path(), &wc_path)?;
			if !already_added {
				out.write_ln(&format!("adding file {}", rel.display()))?;
				svn_add(ctx, &wc_path)?;
			}
		}
	}
	Ok(())
}

fn remove_vanished_entries(
	ctx: &Session,
	out: &Output,
	raw_root: &Path,
	wc_root: &Path,
) -> Result<()> {
	let mut walker = WalkDir::new(wc_root).min_depth(1).into_iter();
	while let Some(entry) = walker.next() {
		let entry = entry.map_err(|err| SvnshimError::Io {
			context: format!("failed to walk {}", wc_root.display()),
			source: err.into(),
		})?;
		if is_admin_dir(&entry) {
			walker.skip_current_dir();
			continue;
		}
		let rel = relative(entry.path(), wc_root).to_path_buf();
		let raw_path = raw_root.join(&rel);
		if entry.file_type().is_dir() {
			if !raw_path.is_dir() {
				out.write_ln(&format!("removing directory {}", rel.display()))?;
				svn_rm(ctx, entry.path())?;
				walker.skip_current_dir();
			}
		} else if entry.file_type().is_file() && !raw_path.is_file() {
			out.write_ln(&format!("removing file {}", rel.display()))?;
			svn_rm(ctx, entry.path())?;
		}
	}
	Ok(())
}

fn svn_add(ctx: &Session, path: &Path) -> Result<()> {
	exec::passthrough(
		ctx,
		&["add".to_string(), path.to_string_lossy().into_owned()],
	)
}

fn svn_rm(ctx: &Session, path: &Path) -> Result<()> {
	exec::passthrough(
		ctx,
		&["rm".to_string(), path.to_string_lossy().into_owned()],
	)
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
	std::fs::copy(src, dst)
		.map(|_| ())
		.map_err(|source| SvnshimError::Io {
			context: format!("failed to copy {} to {}", src.display(), dst.display()),
			source,
		})
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
	for entry in WalkDir::new(src) {
		let entry = entry.map_err(|err| SvnshimError::Io {
			context: format!("failed to walk {}", src.display()),
			source: err.into(),
		})?;
		let target = dst.join(relative(entry.path(), src));
		if entry.file_type().is_dir() {
			std::fs::create_dir_all(&target).map_err(|source| SvnshimError::Io {
				context: format!("failed to create {}", target.display()),
				source,
			})?;
		} else if entry.file_type().is_file() {
			copy_file(entry.path(), &target)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_copy_tree_replicates_structure() {
		let src = tempfile::tempdir().unwrap();
		let dst = tempfile::tempdir().unwrap();
		std::fs::create_dir(src.path().join("sub")).unwrap();
		std::fs::write(src.path().join("sub/file.txt"), "data").unwrap();
		std::fs::write(src.path().join("top.txt"), "top").unwrap();

		let target = dst.path().join("copied");
		copy_tree(src.path(), &target).unwrap();

		assert_eq!(
			std::fs::read_to_string(target.join("sub/file.txt")).unwrap(),
			"data"
		);
		assert_eq!(std::fs::read_to_string(target.join("top.txt")).unwrap(), "top");
	}

	#[test]
	fn test_is_svn_dir() {
		let dir = tempfile::tempdir().unwrap();
		assert!(!is_svn_dir(dir.path()));
		std::fs::create_dir(dir.path().join(".svn")).unwrap();
		assert!(is_svn_dir(dir.path()));
	}

	#[test]
	fn test_paths_equal_on_identical_paths() {
		assert!(paths_equal(Path::new("somepath"), Path::new("somepath")));
		assert!(!paths_equal(Path::new("somepath1"), Path::new("somepath2")));
	}

	#[cfg(windows)]
	#[test]
	fn test_paths_equal_normalizes_case_and_separators() {
		assert!(paths_equal(Path::new(r"Dir\Sub"), Path::new("dir/sub")));
	}

	#[cfg(not(windows))]
	#[test]
	fn test_paths_equal_is_exact_on_unix() {
		assert!(!paths_equal(Path::new("Dir"), Path::new("dir")));
	}
}
