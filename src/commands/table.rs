use std::collections::HashMap;
use std::sync::LazyLock;

/// Subcommand aliases, distilled from `svn help` plus the wrapper's own
/// diff variants.
static COMMAND_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
	let entries: &[(&str, &[&str])] = &[
		("blame", &["praise", "annotate", "ann"]),
		("changelist", &["cl"]),
		("checkout", &["co"]),
		("commit", &["ci"]),
		("copy", &["cp"]),
		("delete", &["del", "remove", "rm"]),
		("diff", &["di", "ediff"]),
		("bdiff", &["ebdiff"]),
		("kdiff3", &["kdiff"]),
		("help", &["?", "h"]),
		("list", &["ls"]),
		("move", &["mv", "rename", "ren"]),
		("propdel", &["pdel", "pd"]),
		("propedit", &["pedit", "pe"]),
		("propget", &["pget", "pg"]),
		("proplist", &["plist", "pl"]),
		("propset", &["pset", "ps"]),
		("status", &["stat", "st"]),
		("switch", &["sw"]),
		("update", &["up"]),
	];
	let mut map = HashMap::new();
	for (canonical, aliases) in entries {
		for alias in *aliases {
			map.insert(*alias, *canonical);
		}
	}
	map
});

/// Resolve a subcommand alias to its canonical name; unknown names come
/// back unchanged.
pub fn canonical(name: &str) -> &str {
	COMMAND_ALIASES.get(name).copied().unwrap_or(name)
}

/// How many leading positional arguments of the command must not be
/// URL-mapped (property names and values).
pub fn unmappable_positionals(canonical_name: &str) -> usize {
	match canonical_name {
		"propset" => 2,
		"propdel" | "propedit" | "propget" => 1,
		_ => 0,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_aliases_resolve_to_canonical_names() {
		assert_eq!(canonical("st"), "status");
		assert_eq!(canonical("stat"), "status");
		assert_eq!(canonical("co"), "checkout");
		assert_eq!(canonical("di"), "diff");
		assert_eq!(canonical("ediff"), "diff");
		assert_eq!(canonical("ebdiff"), "bdiff");
		assert_eq!(canonical("kdiff"), "kdiff3");
		assert_eq!(canonical("ps"), "propset");
		assert_eq!(canonical("?"), "help");
	}

	#[test]
	fn test_unknown_names_pass_through() {
		assert_eq!(canonical("status"), "status");
		assert_eq!(canonical("frobnicate"), "frobnicate");
	}

	#[test]
	fn test_unmappable_positionals() {
		assert_eq!(unmappable_positionals("propset"), 2);
		assert_eq!(unmappable_positionals("propget"), 1);
		assert_eq!(unmappable_positionals("propedit"), 1);
		assert_eq!(unmappable_positionals("propdel"), 1);
		assert_eq!(unmappable_positionals("status"), 0);
	}
}
