//! Error types for template expansion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Errors that abort an expansion.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Grammar, semantic or include error with source location.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A file exists but could not be read; never retried.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExpandError {
    /// The parse error, if this is not an I/O failure.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            ExpandError::Parse(e) => Some(e),
            ExpandError::Io { .. } => None,
        }
    }
}
