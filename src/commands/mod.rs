//! Subcommand dispatch for svnshim.
//!
//! The first positional token selects a command from a closed enum; the
//! explicit pass-through variant hands anything unrecognized to the
//! wrapped client unchanged.

pub mod mergeraw;
pub mod table;

pub use table::{canonical, unmappable_positionals};

use crate::error::{Result, SvnshimError};
use crate::exec::{self, info};
use crate::filter::{
	CHECKOUT_NOISE, ClassifiedLine, DiffFilter, LineFilter, LogFilter, PlainFilter, STATUS_NOISE,
	StatusFilter, UPDATE_NOISE,
};
use crate::help;
use crate::output::Output;
use crate::session::{Report, Session};
use crate::url::{adjust_url_for_wc_path, is_url, map_url};
use std::collections::BTreeSet;
use std::path::Path;

/// The wrapped and extended subcommands. Anything else passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Status,
	StNames,
	StMod,
	StModRoot,
	StModRevert,
	Update,
	Checkout,
	Switch,
	Merge,
	Diff,
	BDiff,
	PDiff,
	Kdiff3,
	Log,
	MergeRaw,
	EditExternals,
	EditIgnore,
	GetExternals,
	GetIgnore,
	Url,
	Branch,
	HelpWrap,
	Help,
	Passthrough(String),
}

impl Command {
	/// Resolve a (canonical) subcommand name to its handler variant.
	pub fn resolve(canonical_name: &str) -> Command {
		match canonical_name {
			"status" => Command::Status,
			"stnames" => Command::StNames,
			"stmod" => Command::StMod,
			"stmodroot" => Command::StModRoot,
			"stmodrevert" => Command::StModRevert,
			"update" => Command::Update,
			"checkout" => Command::Checkout,
			"switch" => Command::Switch,
			"merge" => Command::Merge,
			"diff" => Command::Diff,
			"bdiff" => Command::BDiff,
			"pdiff" => Command::PDiff,
			"kdiff3" => Command::Kdiff3,
			"log" => Command::Log,
			"mergeraw" => Command::MergeRaw,
			"ee" => Command::EditExternals,
			"ei" => Command::EditIgnore,
			"pge" => Command::GetExternals,
			"pgi" => Command::GetIgnore,
			"url" => Command::Url,
			"br" => Command::Branch,
			"helpwrap" => Command::HelpWrap,
			"help" => Command::Help,
			other => Command::Passthrough(other.to_string()),
		}
	}
}

/// URL-map the positional arguments of a command, leaving the property
/// name/value positions of the prop* family untouched.
pub fn map_positionals(
	canonical_name: &str,
	pos_args: Vec<String>,
	ctx: &Session,
	report: &Report,
	out: &Output,
) -> Result<Vec<String>> {
	let skip = unmappable_positionals(canonical_name);
	let resolver = info::SvnResolver { ctx, report, out };
	pos_args
		.into_iter()
		.enumerate()
		.map(|(i, arg)| {
			if i < skip {
				Ok(arg)
			} else {
				map_url(&arg, &ctx.aliases, &resolver)
			}
		})
		.collect()
}

/// Run a command's handler.
pub fn dispatch(
	command: Command,
	ctx: &Session,
	report: &Report,
	out: &Output,
	switch_args: Vec<String>,
	pos_args: Vec<String>,
) -> Result<()> {
	match command {
		Command::Status => {
			let mut filter = StatusFilter::new();
			let args = svn_args(&["st"], &combined(switch_args, pos_args));
			exec::run_filtered(ctx, report, out, &args, Some(&STATUS_NOISE), &mut filter)?;
			report.add_conflicts(filter.take_conflicts());
			Ok(())
		}
		Command::StNames => {
			let mut filter = NamesFilter { modified_only: false };
			let args = svn_args(&["st"], &combined(switch_args, pos_args));
			exec::run_filtered(ctx, report, out, &args, Some(&STATUS_NOISE), &mut filter)
		}
		Command::StMod => {
			let mut filter = NamesFilter { modified_only: true };
			let args = svn_args(&["st"], &combined(switch_args, pos_args));
			exec::run_filtered(ctx, report, out, &args, Some(&STATUS_NOISE), &mut filter)
		}
		Command::StModRoot => {
			let roots: BTreeSet<String> = modified_names(ctx, report, out, switch_args, pos_args)?
				.into_iter()
				.map(|name| path_root(&name).to_string())
				.collect();
			for root in roots {
				out.write_ln(&root)?;
			}
			Ok(())
		}
		Command::StModRevert => {
			let names = modified_names(ctx, report, out, switch_args, pos_args)?;
			exec::passthrough(ctx, &svn_args(&["revert"], &names))
		}
		Command::Update => {
			run_status_styled(ctx, report, out, &["update"], switch_args, pos_args, &UPDATE_NOISE)
		}
		Command::Checkout => run_status_styled(
			ctx,
			report,
			out,
			&["checkout"],
			switch_args,
			pos_args,
			&CHECKOUT_NOISE,
		),
		Command::Switch => switch_command(ctx, report, out, switch_args, pos_args),
		Command::Merge => merge_command(ctx, report, out, switch_args, pos_args),
		Command::Diff => {
			out.attach_pager(&ctx.pager);
			let mut filter = DiffFilter::new(false);
			let args = svn_args(&["diff"], &combined(switch_args, pos_args));
			exec::run_filtered(ctx, report, out, &args, None, &mut filter)
		}
		Command::BDiff => {
			out.attach_pager(&ctx.pager);
			let mut filter = DiffFilter::new(true);
			let args = svn_args(&["diff", "-x", "-b"], &combined(switch_args, pos_args));
			exec::run_filtered(ctx, report, out, &args, None, &mut filter)
		}
		Command::PDiff => {
			out.attach_pager(&ctx.pager);
			let mut filter = DiffFilter::new(false);
			let args = svn_args(
				&["diff", "--diff-cmd", "diff", "-x", "-U1000000", "--patch-compatible"],
				&combined(switch_args, pos_args),
			);
			exec::run_filtered(ctx, report, out, &args, None, &mut filter)
		}
		Command::Kdiff3 => {
			let args = svn_args(
				&["diff", "--diff-cmd", "kdiff3", "-x", "--qall"],
				&combined(switch_args, pos_args),
			);
			exec::passthrough(ctx, &args)
		}
		Command::Log => {
			out.attach_pager(&ctx.pager);
			let mut filter = LogFilter::new();
			let args = svn_args(&["log"], &combined(switch_args, pos_args));
			exec::run_filtered(ctx, report, out, &args, None, &mut filter)
		}
		Command::MergeRaw => {
			let mut pos_args = pos_args;
			if pos_args.is_empty() || pos_args.len() > 2 {
				return Err(SvnshimError::usage("mergeraw RAWPATH [WCPATH]"));
			}
			let raw_root = pos_args.remove(0);
			let wc_root = if pos_args.is_empty() {
				".".to_string()
			} else {
				pos_args.remove(0)
			};
			mergeraw::merge_raw(ctx, out, Path::new(&raw_root), Path::new(&wc_root))
		}
		Command::EditExternals => {
			prop_command(ctx, &["propedit", "svn:externals"], switch_args, pos_args)
		}
		Command::EditIgnore => {
			prop_command(ctx, &["propedit", "svn:ignore"], switch_args, pos_args)
		}
		Command::GetExternals => prop_command(
			ctx,
			&["propget", "svn:externals", "--strict"],
			switch_args,
			pos_args,
		),
		Command::GetIgnore => {
			prop_command(ctx, &["propget", "svn:ignore"], switch_args, pos_args)
		}
		Command::Url => {
			let paths = if pos_args.is_empty() {
				vec![".".to_string()]
			} else {
				pos_args
			};
			for path in paths {
				let url = info::get_url(ctx, report, out, &path)?;
				out.write_ln(&url)?;
			}
			Ok(())
		}
		Command::Branch => branch_command(ctx, report, out, switch_args, pos_args),
		Command::HelpWrap => {
			out.attach_pager(&ctx.pager);
			out.write_raw(&help::long_help(&ctx.config_path))
		}
		Command::Help => {
			if switch_args.is_empty() && pos_args.is_empty() {
				out.attach_pager(&ctx.pager);
				let mut filter = PlainFilter;
				let args = vec!["help".to_string()];
				exec::run_filtered(ctx, report, out, &args, None, &mut filter)?;
				out.write_raw(&help::summary())
			} else {
				exec::passthrough(ctx, &svn_args(&["help"], &combined(switch_args, pos_args)))
			}
		}
		Command::Passthrough(name) => {
			exec::passthrough(
				ctx,
				&svn_args(&[name.as_str()], &combined(switch_args, pos_args)),
			)
		}
	}
}

/// Status lines trimmed to path names; optionally only modified entries
/// (everything but `?`).
struct NamesFilter {
	modified_only: bool,
}

impl LineFilter for NamesFilter {
	fn push(&mut self, line: String) -> Vec<ClassifiedLine> {
		let (status, name) = crate::filter::status::split_status(&line);
		if self.modified_only && status.starts_with('?') {
			Vec::new()
		} else {
			vec![ClassifiedLine::plain(name)]
		}
	}
}

fn combined(switch_args: Vec<String>, pos_args: Vec<String>) -> Vec<String> {
	let mut args = switch_args;
	args.extend(pos_args);
	args
}

fn svn_args(base: &[&str], rest: &[String]) -> Vec<String> {
	let mut args: Vec<String> = base.iter().map(|s| s.to_string()).collect();
	args.extend(rest.iter().cloned());
	args
}

fn run_status_styled(
	ctx: &Session,
	report: &Report,
	out: &Output,
	base: &[&str],
	switch_args: Vec<String>,
	pos_args: Vec<String>,
	noise: &regex::Regex,
) -> Result<()> {
	let mut filter = StatusFilter::new();
	let args = svn_args(base, &combined(switch_args, pos_args));
	exec::run_filtered(ctx, report, out, &args, Some(noise), &mut filter)?;
	report.add_conflicts(filter.take_conflicts());
	Ok(())
}

fn modified_names(
	ctx: &Session,
	report: &Report,
	out: &Output,
	switch_args: Vec<String>,
	pos_args: Vec<String>,
) -> Result<Vec<String>> {
	let args = svn_args(&["st"], &combined(switch_args, pos_args));
	let lines = exec::capture_lines(ctx, report, out, &args, Some(&STATUS_NOISE))?;
	Ok(lines
		.iter()
		.filter_map(|line| {
			let (status, name) = crate::filter::status::split_status(line);
			if status.starts_with('?') {
				None
			} else {
				Some(name.to_string())
			}
		})
		.collect())
}

/// The top-level path component of a status path.
fn path_root(name: &str) -> &str {
	name.split(['/', '\\']).next().unwrap_or(name)
}

fn switch_command(
	ctx: &Session,
	report: &Report,
	out: &Output,
	switch_args: Vec<String>,
	mut pos_args: Vec<String>,
) -> Result<()> {
	let relocating = switch_args.iter().any(|s| s == "--relocate");
	let args = if (1..=2).contains(&pos_args.len()) && !relocating {
		let url = pos_args.remove(0);
		let wc_path = pos_args.pop().unwrap_or_else(|| ".".to_string());
		let resolver = info::SvnResolver { ctx, report, out };
		let new_url = adjust_url_for_wc_path(&url, &wc_path, &resolver, out)?;
		combined(switch_args, vec![new_url, wc_path])
	} else {
		combined(switch_args, pos_args)
	};
	let mut filter = StatusFilter::new();
	exec::run_filtered(
		ctx,
		report,
		out,
		&svn_args(&["switch"], &args),
		Some(&UPDATE_NOISE),
		&mut filter,
	)?;
	report.add_conflicts(filter.take_conflicts());
	Ok(())
}

fn merge_command(
	ctx: &Session,
	report: &Report,
	out: &Output,
	switch_args: Vec<String>,
	mut pos_args: Vec<String>,
) -> Result<()> {
	let wc_path = if pos_args.len() > 1 && !is_url(pos_args.last().map_or("", String::as_str)) {
		pos_args.pop().unwrap_or_else(|| ".".to_string())
	} else {
		".".to_string()
	};
	let resolver = info::SvnResolver { ctx, report, out };
	let mut urls = Vec::new();
	for url in pos_args {
		urls.push(adjust_url_for_wc_path(&url, &wc_path, &resolver, out)?);
	}
	let mut args = combined(switch_args, urls);
	args.push(wc_path);
	// Streaming merge output through our pipe makes svn's interactive
	// conflict menu (which goes straight to the tty) race ahead of the
	// diff text it refers to, so merge runs with inherited stdio.
	exec::passthrough(ctx, &svn_args(&["merge"], &args))
}

fn branch_command(
	ctx: &Session,
	report: &Report,
	out: &Output,
	switch_args: Vec<String>,
	pos_args: Vec<String>,
) -> Result<()> {
	if pos_args.len() != 1 {
		return Err(SvnshimError::usage("br takes exactly one URL"));
	}
	let resolver = info::SvnResolver { ctx, report, out };
	// Default to branching from the current URL; an absolute URL in the
	// argument overrides.
	let branch = map_url(&format!("br:{}", pos_args[0]), &ctx.aliases, &resolver)?;
	let trunk = map_url(&format!("{branch}/tr:"), &ctx.aliases, &resolver)?;
	let mut args = vec!["cp".to_string(), trunk, branch];
	args.extend(switch_args);
	exec::passthrough(ctx, &args)
}

fn prop_command(
	ctx: &Session,
	base: &[&str],
	switch_args: Vec<String>,
	pos_args: Vec<String>,
) -> Result<()> {
	let mut args = combined(switch_args, pos_args);
	if args.is_empty() {
		args.push(".".to_string());
	}
	exec::passthrough(ctx, &svn_args(base, &args))
}
