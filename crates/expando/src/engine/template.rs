//! Template engine.
//!
//! Expands a template line by line. Handles:
//! - Literal text, with each line's leading indentation kept verbatim
//! - `${name}` variable references
//! - `$(command args...)` directives, of which only `include-file` exists
//! - `$$` for a literal `$` and `$` before a newline to join lines
//! - `$--` comments, and lines holding nothing but one
//!
//! Every produced line ends with a newline, whether or not the source line
//! had one. Expanded text is never scanned again.

use winnow::combinator::{cut_err, opt};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;

use crate::engine::context::SearchContext;
use crate::engine::error::ExpandError;
use crate::engine::include::include_file;
use crate::parser::error::{ParseError, ParseErrorKind, Source, compute_suggestions};
use crate::parser::text;

/// Name of the file inclusion directive.
pub const INCLUDE_FILE: &str = "include-file";

/// Every directive the engine dispatches.
const COMMANDS: &[&str] = &[INCLUDE_FILE];

/// Expand `text`, the contents of the file `source_name`, in `context`.
///
/// `source_name` only appears in error locations; the file whose includes
/// resolve relative to is the top of the context's inclusion stack.
///
/// # Errors
///
/// Returns the first grammar or semantic error found anywhere in the file or
/// its includes, or an I/O error if an include candidate exists but cannot
/// be read.
pub fn parse_template(
    context: &SearchContext<'_>,
    source_name: &str,
    text: &str,
) -> Result<String, ExpandError> {
    let engine = TemplateEngine {
        context,
        source: Source::new(source_name, text),
    };
    let mut remaining = text;
    let mut output = String::with_capacity(text.len());
    while !remaining.is_empty() {
        engine.line(&mut remaining, &mut output)?;
    }
    Ok(output)
}

/// Recursive descent over one template file.
struct TemplateEngine<'s, 'c> {
    context: &'s SearchContext<'c>,
    source: Source<'s>,
}

impl<'s> TemplateEngine<'s, '_> {
    /// Expand one line, plus any lines joined to it, into `output`.
    fn line(&self, input: &mut &'s str, output: &mut String) -> Result<(), ExpandError> {
        let indent = self.lex(input, text::blanks)?;
        if self.lex(input, opt(comment_line))?.is_some() {
            return Ok(());
        }

        output.push_str(indent);
        loop {
            if input.is_empty() || self.lex(input, opt(text::newline))?.is_some() {
                break;
            }
            if input.starts_with('$') {
                let expanded = self.expansion(input)?;
                output.push_str(&expanded);
            } else {
                output.push_str(self.lex(input, text::text_chunk)?);
            }
        }
        output.push('\n');
        Ok(())
    }

    /// Expand a `$`-introduced construct.
    fn expansion(&self, input: &mut &'s str) -> Result<String, ExpandError> {
        let start = *input;
        self.lex(input, '$')?;

        match input.chars().next() {
            Some('(') => self.directive(start, input),
            Some('{') => self.variable(start, input),
            Some('$') => {
                self.lex(input, '$')?;
                Ok("$".to_string())
            }
            Some('\n') => {
                self.lex(input, text::newline)?;
                Ok(String::new())
            }
            _ if input.starts_with("--") => {
                self.lex(input, text::comment)?;
                Ok(String::new())
            }
            _ => Err(self.syntax(
                input,
                "invalid expansion: expected `(`, `{`, `$`, `--` or a newline after `$`",
            )),
        }
    }

    /// Expand `$(command args...)`.
    fn directive(&self, start: &'s str, input: &mut &'s str) -> Result<String, ExpandError> {
        self.lex(input, '(')?;
        self.lex(input, text::separators)?;

        let mut words = Vec::new();
        let mut separated = true;
        while self.lex(input, opt(')'))?.is_none() {
            if !separated {
                return Err(self.syntax(input, "expected `)` to close directive"));
            }
            words.push(self.compound_name(input, "directive name or argument")?);
            separated = !self.lex(input, text::separators)?.is_empty();
        }

        let Some((command, args)) = words.split_first() else {
            return Ok(String::new());
        };
        match command.as_str() {
            INCLUDE_FILE => include_file(self.context, args, &self.source.locate(start)),
            _ => Err(self
                .source
                .error_at(
                    start,
                    ParseErrorKind::UnknownCommand {
                        name: command.clone(),
                        suggestions: compute_suggestions(command, COMMANDS.iter().copied()),
                    },
                )
                .into()),
        }
    }

    /// Expand `${name}` by looking the name up in the bindings.
    fn variable(&self, start: &'s str, input: &mut &'s str) -> Result<String, ExpandError> {
        self.lex(input, '{')?;
        let name = self.compound_name(input, "variable name")?;
        self.lex(input, close_brace)?;

        let bindings = self.context.bindings();
        match bindings.get(&name) {
            Some(expansion) => Ok(expansion.to_string()),
            None => {
                let suggestions = compute_suggestions(&name, bindings.names());
                Err(self
                    .source
                    .error_at(start, ParseErrorKind::UndefinedVariable { name, suggestions })
                    .into())
            }
        }
    }

    /// Parse a name built from quoted strings, barewords and nested
    /// expansions, concatenated without separators.
    fn compound_name(&self, input: &mut &'s str, what: &str) -> Result<String, ExpandError> {
        let mut name = String::new();
        let mut parts = 0usize;
        loop {
            if input.starts_with(['"', '\'']) {
                name.push_str(&self.lex(input, text::quoted_string)?);
            } else if input.starts_with('$') {
                name.push_str(&self.expansion(input)?);
            } else if let Some(word) = self.lex(input, opt(text::bareword))? {
                name.push_str(word);
            } else if parts == 0 {
                return Err(self.syntax(input, &format!("expected {what}")));
            } else {
                return Ok(name);
            }
            parts += 1;
        }
    }

    /// Run a lexical parser, positioning any failure in this source.
    fn lex<T>(
        &self,
        input: &mut &'s str,
        mut parser: impl Parser<&'s str, T, ErrMode<ContextError>>,
    ) -> Result<T, ParseError> {
        match parser.parse_next(input) {
            Ok(value) => Ok(value),
            Err(e) => Err(self.source.syntax_error(input, e)),
        }
    }

    fn syntax(&self, input: &str, message: &str) -> ExpandError {
        self.source
            .error_at(input, ParseErrorKind::Syntax(message.to_string()))
            .into()
    }
}

/// Parse a line holding only a `$` comment, with its newline if present.
fn comment_line(input: &mut &str) -> ModalResult<()> {
    ('$', text::comment, opt(text::newline))
        .void()
        .parse_next(input)
}

fn close_brace(input: &mut &str) -> ModalResult<char> {
    cut_err('}')
        .context(StrContext::Expected(StrContextValue::CharLiteral('}')))
        .parse_next(input)
}
