//! CLI command implementations.

mod check;
mod expand;
mod vars;

use std::path::{Path, PathBuf};

use clap::Args;
use expando::{ExpandError, Expander, MAX_INCLUDE_DEPTH};
use tracing::info;

pub use check::{run_check, CheckArgs};
pub use expand::{run_expand, ExpandArgs};
pub use vars::{run_vars, VarsArgs};

/// Include search options shared by the commands that expand templates.
#[derive(Debug, Args)]
pub struct IncludeArgs {
    /// Directory searched for include files after the including file's own
    /// directory (repeatable, tried in order)
    #[arg(
        short = 'I',
        long = "include-dir",
        env = "EXPANDO_INCLUDE_PATH",
        value_delimiter = ':'
    )]
    pub include_dirs: Vec<PathBuf>,

    /// Maximum number of nested includes
    #[arg(long, default_value_t = MAX_INCLUDE_DEPTH)]
    pub max_depth: usize,
}

impl IncludeArgs {
    /// Build an expander configured with these options.
    pub fn expander(&self) -> Expander {
        Expander::builder()
            .search_dirs(self.include_dirs.clone())
            .max_depth(self.max_depth)
            .build()
    }
}

/// Load `bindings` into `expander`, then expand `template` with them.
fn load_and_expand(
    expander: &mut Expander,
    bindings: &Path,
    template: &Path,
) -> Result<String, ExpandError> {
    let count = expander.load_bindings(bindings)?;
    info!(bindings = %bindings.display(), count, "loaded bindings");
    expander.expand_file(template)
}
