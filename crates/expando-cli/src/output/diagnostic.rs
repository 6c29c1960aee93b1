//! Miette diagnostic wrapper for expando parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;

use expando::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for expando parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{location}: {message}")]
#[diagnostic(code(expando::parse))]
pub struct ExpandoDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    location: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl ExpandoDiagnostic {
    /// Create a diagnostic from a ParseError, reading back the file it names
    /// for a source snippet.
    pub fn from_parse_error(err: &ParseError) -> Self {
        let content = read_to_string(&err.location.source).ok();
        Self::with_content(err, content)
    }

    /// Create a diagnostic from a ParseError and the text it was raised in.
    ///
    /// Without the text the diagnostic carries no snippet.
    pub fn with_content(err: &ParseError, content: Option<String>) -> Self {
        let span = content.as_deref().map(|content| {
            let offset = byte_offset(content, err.location.line, err.location.column);
            let len = content[offset..].chars().next().map_or(0, char::len_utf8);
            SourceSpan::from((offset, len))
        });

        ExpandoDiagnostic {
            src: NamedSource::new(err.location.source.clone(), content.unwrap_or_default()),
            span,
            location: err.location.to_string(),
            message: err.kind.to_string(),
            help: suggestion_help(err.suggestions()),
        }
    }
}

/// Convert a 1-based line and character column to a byte offset, clamped to
/// the content.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start = content
        .split('\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        .min(content.len());

    line_start
        + content[line_start..]
            .chars()
            .take_while(|&c| c != '\n')
            .take(column.saturating_sub(1))
            .map(char::len_utf8)
            .sum::<usize>()
}

fn suggestion_help(suggestions: &[String]) -> Option<String> {
    match suggestions {
        [] => None,
        [only] => Some(format!("did you mean '{only}'?")),
        several => Some(format!(
            "did you mean one of: {}?",
            several
                .iter()
                .map(|s| format!("'{s}'"))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use expando::{ParseErrorKind, SourceLocation};

    use super::*;

    fn error(line: usize, column: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::new(
            SourceLocation {
                source: "main.in".to_string(),
                line,
                column,
            },
            kind,
        )
    }

    #[test]
    fn offset_counts_characters_within_line() {
        assert_eq!(byte_offset("ab\ncd\n", 2, 2), 4);
        assert_eq!(byte_offset("é${x}\n", 1, 2), 2);
    }

    #[test]
    fn offset_is_clamped() {
        assert_eq!(byte_offset("ab", 5, 9), 2);
        assert_eq!(byte_offset("ab\ncd", 1, 9), 2);
    }

    #[test]
    fn span_covers_reported_character() {
        let err = error(
            1,
            4,
            ParseErrorKind::UndefinedVariable {
                name: "x".to_string(),
                suggestions: vec![],
            },
        );
        let diagnostic = ExpandoDiagnostic::with_content(&err, Some("ok ${x}\n".to_string()));
        assert_eq!(diagnostic.span, Some(SourceSpan::from((3, 1))));
        assert_eq!(diagnostic.to_string(), "main.in:1:4: undefined variable `x`");
        assert_eq!(diagnostic.help, None);
    }

    #[test]
    fn unreadable_source_has_no_span() {
        let err = error(1, 1, ParseErrorKind::IncludeArity { got: 2 });
        assert_eq!(ExpandoDiagnostic::with_content(&err, None).span, None);
    }

    #[test]
    fn suggestions_become_help() {
        assert_eq!(
            suggestion_help(&["base".to_string()]).as_deref(),
            Some("did you mean 'base'?")
        );
        assert_eq!(
            suggestion_help(&["ab".to_string(), "ac".to_string()]).as_deref(),
            Some("did you mean one of: 'ab', 'ac'?")
        );
    }
}
