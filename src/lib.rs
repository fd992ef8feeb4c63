//! Svnshim - colorizing, URL-mapping wrapper around the Subversion CLI.
//!
//! This library provides the core functionality for svnshim, including:
//! - URL alias and keyword mapping with cycle detection
//! - Structural URL split/join and working-copy tail adjustment
//! - Streaming classification of status/update/diff/log output
//! - Line-level re-diffing of `svn:externals` property blocks
//! - Pager and notification plumbing around the wrapped client
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use svnshim::url::{map_url, WcResolver};
//! use svnshim::Result;
//!
//! struct NoWc;
//!
//! impl WcResolver for NoWc {
//!     fn wc_url(&self, path: &str) -> Result<String> {
//!         Ok(format!("http://server/repo/trunk/{path}"))
//!     }
//! }
//!
//! let mut aliases = HashMap::new();
//! aliases.insert("proj".to_string(), "http://server/proj".to_string());
//! let url = map_url("//proj/trunk", &aliases, &NoWc).unwrap();
//! assert_eq!(url, "http://server/proj/trunk");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod filter;
pub mod help;
pub mod output;
pub mod session;
pub mod switches;
pub mod url;

pub use error::{Result, SvnshimError};
