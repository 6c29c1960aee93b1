//! Parse error types for expando.

use std::fmt;
use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;
use winnow::error::{ContextError, ErrMode, StrContext};

/// Where in which source an error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Logical source name (usually the file path as given).
    pub source: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// A positioned error raised while parsing a bindings or template file.
///
/// The first error anywhere aborts the whole expansion, so a `ParseError`
/// raised inside an included file travels up unchanged and still names the
/// included file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {kind}")]
pub struct ParseError {
    pub location: SourceLocation,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(location: SourceLocation, kind: ParseErrorKind) -> Self {
        Self { location, kind }
    }

    /// Near-miss names worth suggesting to the user, if any.
    pub fn suggestions(&self) -> &[String] {
        match &self.kind {
            ParseErrorKind::UndefinedVariable { suggestions, .. }
            | ParseErrorKind::UnknownCommand { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Input that matches no production of the grammar.
    #[error("{0}")]
    Syntax(String),

    /// A bindings file defines the same name twice.
    #[error("attempt to redefine `{name}`")]
    Redefinition { name: String },

    /// `${name}` with no binding for `name`.
    #[error("undefined variable `{name}`")]
    UndefinedVariable {
        name: String,
        suggestions: Vec<String>,
    },

    /// `$(name ...)` where `name` is not a known directive.
    #[error("unknown command `{name}`")]
    UnknownCommand {
        name: String,
        suggestions: Vec<String>,
    },

    /// `include-file` called with zero or several arguments.
    #[error("include-file command takes exactly one argument")]
    IncludeArity { got: usize },

    /// No candidate path for an include exists.
    #[error("could not find include file `{file}`")]
    IncludeNotFound { file: String },

    /// An include would re-enter a file that is already being expanded.
    #[error("recursive includes: {}", display_chain(chain))]
    RecursiveInclude { chain: Vec<PathBuf> },

    /// The inclusion stack is already at its limit.
    #[error("maximum recursion depth of {limit} reached")]
    DepthExceeded { limit: usize },
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A named piece of text being parsed, used to turn a position in the
/// remaining input back into a line and column.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Source<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> Source<'a> {
    pub(crate) fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Locate `remaining`, a suffix of this source's text.
    pub(crate) fn locate(&self, remaining: &str) -> SourceLocation {
        let (line, column) = calculate_position(self.text, remaining);
        SourceLocation {
            source: self.name.to_string(),
            line,
            column,
        }
    }

    pub(crate) fn error_at(&self, remaining: &str, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.locate(remaining), kind)
    }

    /// Convert a failed `winnow` parse into a positioned syntax error.
    pub(crate) fn syntax_error(&self, remaining: &str, err: ErrMode<ContextError>) -> ParseError {
        let message = match err {
            ErrMode::Backtrack(e) | ErrMode::Cut(e) => describe(&e),
            ErrMode::Incomplete(_) => "unexpected end of input".to_string(),
        };
        self.error_at(remaining, ParseErrorKind::Syntax(message))
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len().saturating_sub(remaining.len());
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let line_start = consumed_str.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed_str[line_start..].chars().count() + 1;
    (line, column)
}

/// Render a `winnow` failure: the innermost label if there is one, else the
/// innermost expectation.
fn describe(err: &ContextError) -> String {
    let mut expected = None;
    for context in err.context() {
        match context {
            StrContext::Label(label) => return (*label).to_string(),
            StrContext::Expected(value) => {
                expected.get_or_insert_with(|| format!("expected {value}"));
            }
            _ => {}
        }
    }
    expected.unwrap_or_else(|| "unexpected input".to_string())
}

/// Up to three names from `available` that are a likely typo of `name`.
pub(crate) fn compute_suggestions<'n>(
    name: &str,
    available: impl IntoIterator<Item = &'n str>,
) -> Vec<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            (dist <= max_distance && dist > 0).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_unstable();
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}
