//! Implementation of the `expando vars` command.

use std::path::PathBuf;

use clap::Args;
use expando::Expander;
use miette::{IntoDiagnostic, Result};

use crate::output::report_error;
use crate::output::table::format_bindings_table;

/// Arguments for the vars command.
#[derive(Debug, Args)]
pub struct VarsArgs {
    /// Bindings file to list
    pub bindings: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the vars command.
pub fn run_vars(args: VarsArgs) -> Result<i32> {
    let mut expander = Expander::new();
    if let Err(e) = expander.load_bindings(&args.bindings) {
        return Ok(report_error(&e));
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(expander.bindings()).into_diagnostic()?
        );
    } else {
        println!("{}", format_bindings_table(expander.bindings()));
    }
    Ok(exitcode::OK)
}
