use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use svnshim::commands::{self, Command};
use svnshim::config;
use svnshim::error::SvnshimError;
use svnshim::exec;
use svnshim::help;
use svnshim::output::Output;
use svnshim::session::{Report, Session};
use svnshim::switches::{self, ParsedArgs};

#[derive(Parser)]
#[command(name = "svnshim")]
#[command(
	author,
	version,
	about = "Colorizing, URL-mapping wrapper around the Subversion command-line client"
)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
	/// Arguments passed through to the Subversion client, with URL-like
	/// positionals rewritten first.
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	args: Vec<String>,
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let parsed = match switches::parse_args(&cli.args) {
		Ok(parsed) => parsed,
		Err(e) => {
			eprintln!("svnshim: {e}");
			return ExitCode::FAILURE;
		}
	};

	if parsed.options.debug {
		env_logger::builder()
			.filter_level(LevelFilter::Debug)
			.init();
	} else {
		env_logger::init();
	}

	let (config, config_path) = match config::load_or_create() {
		Ok(loaded) => loaded,
		Err(e) => {
			eprintln!("svnshim: {e}");
			return ExitCode::FAILURE;
		}
	};

	let session = match Session::new(config, config_path, &parsed.options) {
		Ok(session) => session,
		Err(e) => {
			eprintln!("svnshim: {e}");
			return ExitCode::FAILURE;
		}
	};

	let out = Output::stdout(session.scheme.clone());
	let report = Report::default();

	let code = match run(&session, &report, &out, parsed) {
		Ok(()) => ExitCode::SUCCESS,
		// The operator quit the pager early; everything already shown.
		Err(SvnshimError::OutputClosed) => ExitCode::SUCCESS,
		Err(SvnshimError::Interrupted) => {
			report.add_warning("svnshim: interrupted");
			ExitCode::FAILURE
		}
		Err(e) => {
			report.add_warning(format!("svnshim: {e}"));
			ExitCode::FAILURE
		}
	};

	report.display(&out);
	out.finish();
	code
}

fn run(session: &Session, report: &Report, out: &Output, parsed: ParsedArgs) -> svnshim::Result<()> {
	let ParsedArgs {
		switch_args,
		mut pos_args,
		options,
	} = parsed;

	if options.debug_args {
		out.write_ln(&format!("switch_args = {switch_args:?}"))?;
		out.write_ln(&format!("pos_args = {pos_args:?}"))?;
		return Ok(());
	}

	if pos_args.is_empty() {
		// Newer svn clients fail outright with no arguments; print the
		// same usage hint without invoking the client.
		if !switch_args.is_empty() {
			exec::passthrough(session, &switch_args)?;
		} else {
			out.write_ln("Type 'svn help' for usage.")?;
		}
		if switch_args.iter().any(|s| s == "--version") {
			out.write_ln(&format!("svnshim version {}", env!("CARGO_PKG_VERSION")))?;
		} else {
			out.write_raw(&help::summary())?;
		}
		return Ok(());
	}

	let name = pos_args.remove(0);
	let canonical_name = commands::canonical(&name).to_string();
	let pos_args = commands::map_positionals(&canonical_name, pos_args, session, report, out)?;
	let command = Command::resolve(&canonical_name);
	commands::dispatch(command, session, report, out, switch_args, pos_args)
}
