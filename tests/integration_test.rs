#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly
#![cfg(unix)]

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

const FAKE_SVN: &str = r#"#!/bin/sh
case "$1" in
st)
	if [ "$2" = "warn" ]; then
		printf 'note from svn\n' >&2
	fi
	printf 'A      added.txt\n'
	printf '?      unknown.txt\n'
	printf 'C      conflicted.txt\n'
	printf 'M      dir/changed.txt\n'
	printf 'Performing status on external item at ext\n'
	printf 'X      ext\n'
	;;
info)
	printf 'Path: .\n'
	printf 'URL: http://server/repo/trunk/comp\n'
	printf 'Repository Root: http://server/repo\n'
	printf '\n'
	;;
log)
	printf -- '------------------------------------------------------------------------\n'
	printf 'r15 | committer | 2014-10-12 11:36:30 -0500 (Sun, 12 Oct 2014) | 1 line\n'
	printf '\n'
	printf 'Fix the frobnicator\n'
	;;
diff)
	printf 'Index: x\n'
	printf '+new line\n'
	printf '-old line\n'
	printf 'Property changes on: .\n'
	printf 'Modified: svn:externals\n'
	printf '   - one http://server/one\n'
	printf '   - two http://server/two\n'
	printf '   + one http://server/one\n'
	printf '   + five http://server/five\n'
	;;
fail)
	exit 3
	;;
*)
	printf 'passthrough: %s\n' "$*"
	;;
esac
"#;

struct Fixture {
	_dir: tempfile::TempDir,
	home: PathBuf,
	svn: PathBuf,
}

impl Fixture {
	fn new() -> Self {
		let dir = tempfile::tempdir().unwrap();
		let home = dir.path().join("home");
		fs::create_dir_all(&home).unwrap();

		let svn = dir.path().join("fake-svn");
		fs::write(&svn, FAKE_SVN).unwrap();
		let mut perms = fs::metadata(&svn).unwrap().permissions();
		std::os::unix::fs::PermissionsExt::set_mode(&mut perms, 0o755);
		fs::set_permissions(&svn, perms).unwrap();

		Fixture {
			_dir: dir,
			home,
			svn,
		}
	}

	/// Where the child process's `dirs::config_dir()` will point.
	fn config_dir(&self) -> PathBuf {
		if cfg!(target_os = "macos") {
			self.home.join("Library").join("Application Support")
		} else {
			self.home.join(".config")
		}
	}

	fn config_path(&self) -> PathBuf {
		self.config_dir().join("svnshim").join("config.toml")
	}

	fn write_config(&self, contents: &str) {
		let path = self.config_path();
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, contents).unwrap();
	}

	fn cmd(&self) -> assert_cmd::Command {
		let mut cmd = assert_cmd::Command::cargo_bin("svnshim").unwrap();
		cmd.env("HOME", &self.home)
			.env("XDG_CONFIG_HOME", self.home.join(".config"))
			.env_remove("SVN_PAGER")
			.env_remove("PAGER")
			.arg("--svn")
			.arg(&self.svn);
		cmd
	}
}

fn contains(needle: &str) -> predicates::str::ContainsPredicate {
	predicate::str::contains(needle)
}

// ============================================================================
// Config file tests
// ============================================================================

#[test]
fn test_first_run_creates_sample_config() {
	let fixture = Fixture::new();
	fixture.cmd().arg("st").assert().success();

	let contents = fs::read_to_string(fixture.config_path()).unwrap();
	assert!(contents.contains("[aliases]"));
	assert!(contents.contains("[pager]"));
}

#[test]
fn test_malformed_config_is_fatal() {
	let fixture = Fixture::new();
	fixture.write_config("[pager\nenabled = ");

	fixture
		.cmd()
		.arg("st")
		.assert()
		.failure()
		.stderr(contains("failed to parse config file"));
}

// ============================================================================
// Status family
// ============================================================================

#[test]
fn test_status_styles_lines_and_reports_conflicts() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "on", "st"])
		.assert()
		.success()
		.stdout(contains("\u{1b}["))
		.stdout(contains("A      added.txt"))
		.stdout(contains("Total conflicts: 1"))
		.stdout(contains("C      conflicted.txt"));
}

#[test]
fn test_status_suppresses_noise_lines() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "off", "st"])
		.assert()
		.success()
		.stdout(contains("Performing status").not())
		.stdout(contains("X      ext").not());
}

#[test]
fn test_color_off_emits_no_escapes() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "off", "st"])
		.assert()
		.success()
		.stdout(contains("\u{1b}[").not());
}

#[test]
fn test_stnames_trims_to_bare_names() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "off", "stnames"])
		.assert()
		.success()
		.stdout(contains("added.txt"))
		.stdout(contains("unknown.txt"))
		.stdout(contains("A      added.txt").not());
}

#[test]
fn test_stmod_excludes_untracked_files() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "off", "stmod"])
		.assert()
		.success()
		.stdout(contains("dir/changed.txt"))
		.stdout(contains("unknown.txt").not());
}

#[test]
fn test_stmodroot_prints_unique_roots() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "off", "stmodroot"])
		.assert()
		.success()
		.stdout(contains("dir\n"))
		.stdout(contains("dir/changed.txt").not());
}

// ============================================================================
// URL mapping
// ============================================================================

#[test]
fn test_url_prints_working_copy_url() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.arg("url")
		.assert()
		.success()
		.stdout(contains("http://server/repo/trunk/comp"));
}

#[test]
fn test_url_alias_expansion() {
	let fixture = Fixture::new();
	fixture.write_config("[aliases]\nproj = \"http://server/proj\"\n");

	fixture
		.cmd()
		.args(["url", "//proj"])
		.assert()
		.success()
		.stdout(contains("http://server/proj"));
}

#[test]
fn test_url_keyword_mapping_through_working_copy() {
	let fixture = Fixture::new();
	// "br:feature" resolves against the working copy URL from `svn info`.
	fixture
		.cmd()
		.args(["url", "br:feature"])
		.assert()
		.success()
		.stdout(contains("http://server/repo/branches/feature"));
}

#[test]
fn test_undefined_alias_fails() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["url", "//nope"])
		.assert()
		.failure()
		.stdout(contains("undefined alias"));
}

// ============================================================================
// Diff and log
// ============================================================================

#[test]
fn test_diff_rediffs_externals_blocks() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "off", "diff"])
		.assert()
		.success()
		.stdout(contains("-two http://server/two"))
		.stdout(contains("+five http://server/five"))
		.stdout(contains("Old externals"))
		.stdout(contains("-one http://server/one").not());
}

#[test]
fn test_log_output_is_styled() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["--color", "on", "log"])
		.assert()
		.success()
		.stdout(contains("r15"))
		.stdout(contains("\u{1b}["))
		.stdout(contains("Fix the frobnicator"));
}

// ============================================================================
// Pass-through and error propagation
// ============================================================================

#[test]
fn test_unrecognized_command_passes_through() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["cleanup", "wc-path"])
		.assert()
		.success()
		.stdout(contains("passthrough: cleanup wc-path"));
}

#[test]
fn test_child_failure_becomes_exit_one_with_command_line() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.arg("fail")
		.assert()
		.failure()
		.stdout(contains("failing exit code 3"));
}

#[test]
fn test_stderr_is_relayed_and_totaled() {
	let fixture = Fixture::new();
	// "st" streams through our pipes, so the fake's stderr is relayed
	// live and totaled in the end-of-run summary.
	fixture
		.cmd()
		.args(["--color", "off", "st", "warn"])
		.assert()
		.success()
		.stderr(contains("note from svn"))
		.stdout(contains("Total characters of stderr from svn: 14"));
}

#[test]
fn test_no_arguments_prints_usage_hint() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.assert()
		.success()
		.stdout(contains("Type 'svn help' for usage."))
		.stdout(contains("helpwrap"));
}

#[test]
fn test_version_switch_reports_wrapper_version() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(contains("svnshim version"));
}

#[test]
fn test_invalid_switch_is_reported() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.args(["st", "--frobnicate"])
		.assert()
		.failure()
		.stderr(contains("invalid switch"));
}

#[test]
fn test_helpwrap_documents_keywords() {
	let fixture = Fixture::new();
	fixture
		.cmd()
		.arg("helpwrap")
		.assert()
		.success()
		.stdout(contains("URL aliases and mapping"))
		.stdout(contains("tr:"))
		.stdout(contains("config.toml"));
}
