//! Implementation of the `expando check` command.

use std::path::PathBuf;

use clap::Args;
use expando::ExpandError;
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use super::{load_and_expand, IncludeArgs};
use crate::output::{exit_code, report_error};

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Bindings file defining the variables
    pub bindings: PathBuf,

    /// Template file to check
    pub template: PathBuf,

    #[command(flatten)]
    pub include: IncludeArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for check results.
#[derive(Debug, Serialize)]
struct CheckJson {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorJson>,
}

/// JSON form of an expansion error.
#[derive(Debug, Serialize)]
struct ErrorJson {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

impl From<&ExpandError> for ErrorJson {
    fn from(err: &ExpandError) -> Self {
        match err.as_parse_error() {
            Some(e) => ErrorJson {
                message: e.kind.to_string(),
                source: Some(e.location.source.clone()),
                line: Some(e.location.line),
                column: Some(e.location.column),
                suggestions: e.suggestions().to_vec(),
            },
            None => ErrorJson {
                message: err.to_string(),
                source: None,
                line: None,
                column: None,
                suggestions: Vec::new(),
            },
        }
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut expander = args.include.expander();
    let result = load_and_expand(&mut expander, &args.bindings, &args.template);

    if args.json {
        let output = CheckJson {
            ok: result.is_ok(),
            error: result.as_ref().err().map(ErrorJson::from),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(result.as_ref().map_or_else(exit_code, |_| exitcode::OK));
    }

    match result {
        Ok(_) => {
            println!(
                "{} {}",
                "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                args.template.display()
            );
            Ok(exitcode::OK)
        }
        Err(e) => Ok(report_error(&e)),
    }
}
