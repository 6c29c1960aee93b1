//! Bindings file parser.
//!
//! A bindings file is a list of `name value` lines. Blank lines and `--`
//! comments may appear between bindings, and a binding may end with a
//! `$-- comment` instead of a newline.

use tracing::debug;
use winnow::combinator::{alt, cut_err, opt, repeat};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use super::error::{ParseError, ParseErrorKind, Source};
use super::text::{bareword, comment, newline, quoted_string, spaces, value_run};
use crate::types::ExpansionMap;

/// Parse a bindings file into an [`ExpansionMap`].
///
/// Each binding `name value` maps `name` to `"name value"`. Defining a name
/// twice is an error reported at the second definition.
pub fn parse_bindings(source_name: &str, text: &str) -> Result<ExpansionMap, ParseError> {
    let source = Source::new(source_name, text);
    let mut remaining = text;
    let mut map = ExpansionMap::new();

    loop {
        if let Err(e) = skip_gaps(&mut remaining) {
            return Err(source.syntax_error(remaining, e));
        }
        if remaining.is_empty() {
            break;
        }

        let start = remaining;
        let (name, value) = match binding(&mut remaining) {
            Ok(parsed) => parsed,
            Err(e) => return Err(source.syntax_error(remaining, e)),
        };
        if !map.define(&name, &value) {
            return Err(source.error_at(start, ParseErrorKind::Redefinition { name }));
        }
    }

    debug!(source = source_name, bindings = map.len(), "parsed bindings");
    Ok(map)
}

/// Skip blank space, newlines and comments between bindings.
fn skip_gaps(input: &mut &str) -> ModalResult<()> {
    repeat(0.., alt((gap_space.void(), comment.void()))).parse_next(input)
}

/// Parse a non-empty run of spaces and newlines.
fn gap_space<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., [' ', '\n']).parse_next(input)
}

/// Parse one binding: name, value and terminator.
fn binding(input: &mut &str) -> ModalResult<(String, String)> {
    let name = binding_name
        .context(StrContext::Expected(StrContextValue::Description(
            "binding name",
        )))
        .parse_next(input)?;
    spaces(input)?;
    let value = cut_err(binding_value)
        .context(StrContext::Expected(StrContextValue::Description(
            "binding value",
        )))
        .parse_next(input)?;
    spaces(input)?;
    cut_err(terminator)
        .context(StrContext::Expected(StrContextValue::Description(
            "end of line",
        )))
        .parse_next(input)?;
    Ok((name, value))
}

/// Parse a binding name: one or more quoted strings and barewords.
fn binding_name(input: &mut &str) -> ModalResult<String> {
    let mut name = String::new();
    let mut parts = 0usize;
    loop {
        let part = if input.starts_with(['"', '\'']) {
            Some(quoted_string(input)?)
        } else {
            opt(bareword).parse_next(input)?.map(str::to_string)
        };
        match part {
            Some(part) => {
                name.push_str(&part);
                parts += 1;
            }
            None if parts == 0 => return Err(ErrMode::Backtrack(ContextError::new())),
            None => return Ok(name),
        }
    }
}

/// Parse a binding value: one or more quoted strings and unquoted runs.
///
/// Trailing spaces of an unquoted run are dropped when the binding ends
/// right after it.
fn binding_value(input: &mut &str) -> ModalResult<String> {
    let mut value = String::new();
    let mut parts = 0usize;
    loop {
        if input.starts_with(['"', '\'']) {
            value.push_str(&quoted_string(input)?);
        } else if let Some(run) = opt(value_run).parse_next(input)? {
            if at_terminator(input) {
                value.push_str(run.trim_end_matches(' '));
            } else {
                value.push_str(run);
            }
        } else if parts == 0 {
            return Err(ErrMode::Backtrack(ContextError::new()));
        } else {
            return Ok(value);
        }
        parts += 1;
    }
}

fn at_terminator(input: &str) -> bool {
    input.is_empty() || input.starts_with('\n') || input.starts_with("$--")
}

/// Parse the end of a binding: a newline, or a `$` comment whose newline is
/// left for the following gap.
fn terminator(input: &mut &str) -> ModalResult<()> {
    alt((newline.void(), ('$', comment).void())).parse_next(input)
}
