//! Configuration loading and parsing for svnshim.
//!
//! This module handles:
//! - TOML config file parsing
//! - Locating the per-user config file
//! - Writing the documented sample config on first run

pub mod parser;
pub mod types;

pub use parser::{config_file_path, load_or_create, parse_config_file, parse_config_str};
pub use types::{Config, PagerSection};
