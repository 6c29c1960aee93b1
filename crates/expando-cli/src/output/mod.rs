//! Output formatting for CLI results and errors.

pub mod diagnostic;
pub mod table;

use expando::ExpandError;

pub use diagnostic::ExpandoDiagnostic;

/// Exit code for an expansion error.
pub fn exit_code(err: &ExpandError) -> i32 {
    match err {
        ExpandError::Parse(_) => exitcode::DATAERR,
        ExpandError::Io { .. } => exitcode::IOERR,
    }
}

/// Print an expansion error to stderr and return the matching exit code.
pub fn report_error(err: &ExpandError) -> i32 {
    match err.as_parse_error() {
        Some(e) => eprintln!("{:?}", miette::Report::new(ExpandoDiagnostic::from_parse_error(e))),
        None => eprintln!("{:?}", miette::miette!("{err}")),
    }
    exit_code(err)
}
