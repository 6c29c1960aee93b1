//! Template expansion engine.
//!
//! This module expands templates against an [`ExpansionMap`](crate::ExpansionMap).
//! It walks template lines, substitutes variables, and resolves
//! `include-file` directives by recursively expanding the included file in a
//! derived [`SearchContext`].

mod context;
mod error;
mod files;
mod include;
mod session;
mod template;

pub use context::{MAX_INCLUDE_DEPTH, SearchContext};
pub use error::ExpandError;
pub use files::{DiskFiles, FileSource};
pub use session::Expander;
pub use template::{INCLUDE_FILE, parse_template};
