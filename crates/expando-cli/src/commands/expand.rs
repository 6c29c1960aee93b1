//! Implementation of the `expando expand` command.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use miette::Result;

use super::{load_and_expand, IncludeArgs};
use crate::output::report_error;

/// Arguments for the expand command.
#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Bindings file defining the variables
    pub bindings: PathBuf,

    /// Template file to expand
    pub template: PathBuf,

    /// Write the expansion to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub include: IncludeArgs,
}

/// Run the expand command.
///
/// Nothing is written unless the whole expansion succeeds.
pub fn run_expand(args: ExpandArgs) -> Result<i32> {
    let mut expander = args.include.expander();
    let expanded = match load_and_expand(&mut expander, &args.bindings, &args.template) {
        Ok(expanded) => expanded,
        Err(e) => return Ok(report_error(&e)),
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, expanded) {
                eprintln!("{:?}", miette::miette!("failed to write '{}': {e}", path.display()));
                return Ok(exitcode::CANTCREAT);
            }
        }
        None => print!("{expanded}"),
    }
    Ok(exitcode::OK)
}
