//! URL structure and rewriting for svnshim.
//!
//! This module handles:
//! - Head/middle/tail decomposition of repository URLs
//! - Peg revision splitting
//! - Alias and keyword mapping with cycle detection
//! - Tail adjustment against a working copy's checkout location

pub mod adjust;
pub mod mapper;
pub mod split;

pub use adjust::adjust_url_for_wc_path;
pub use mapper::{map_url, WcResolver};
pub use split::{is_url, join, split, split_peg};
