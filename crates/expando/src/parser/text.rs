//! Lexical primitives shared by the bindings and template grammars.
//!
//! - Quoted strings with `"` or `'` delimiters and `\" \' \n \\` escapes
//! - Unquoted barewords and bindings value runs
//! - `--` comments running to the end of the line
//! - Whitespace runs

use winnow::combinator::{cut_err, preceded};
use winnow::error::StrContext;
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

/// Characters that end a bareword besides whitespace and control characters.
const BAREWORD_DELIMITERS: &[char] = &['"', '$', '\'', '(', ')', '[', '\\', ']', '{', '|', '}'];

/// Parse a quoted string and return its decoded contents.
pub(crate) fn quoted_string(input: &mut &str) -> ModalResult<String> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let mut decoded = String::new();
    loop {
        let raw: &str =
            take_while(0.., |c: char| c >= ' ' && c != '\\' && c != quote).parse_next(input)?;
        decoded.push_str(raw);

        if input.starts_with('\\') {
            decoded.push(escape_sequence(input)?);
            continue;
        }

        cut_err(quote)
            .context(StrContext::Label("unterminated quoted string"))
            .parse_next(input)?;
        return Ok(decoded);
    }
}

/// Parse a backslash escape inside a quoted string.
fn escape_sequence(input: &mut &str) -> ModalResult<char> {
    preceded(
        '\\',
        cut_err(any.verify_map(|c: char| match c {
            '"' => Some('"'),
            '\'' => Some('\''),
            'n' => Some('\n'),
            '\\' => Some('\\'),
            _ => None,
        }))
        .context(StrContext::Label("unsupported escape sequence")),
    )
    .parse_next(input)
}

/// Whether `c` may appear in an unquoted template token.
pub(crate) fn is_bareword_char(c: char) -> bool {
    c > ' ' && !BAREWORD_DELIMITERS.contains(&c)
}

/// Parse an unquoted token: a maximal run of non-delimiter characters.
pub(crate) fn bareword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_bareword_char).parse_next(input)
}

/// Parse an unquoted run of a bindings value.
///
/// Unlike a bareword the run may contain spaces; it stops at quotes, `$`,
/// newlines and other control characters.
pub(crate) fn value_run<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c >= ' ' && c != '"' && c != '\'' && c != '$' && c != '\u{7f}'
    })
    .parse_next(input)
}

/// Parse a comment: `--` up to, not including, the next newline.
pub(crate) fn comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded("--", take_while(0.., |c| c != '\n')).parse_next(input)
}

/// Parse a run of literal template text, which stops at `$` and newlines.
pub(crate) fn text_chunk<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c| c != '$' && c != '\n').parse_next(input)
}

/// Parse optional spaces and tabs.
pub(crate) fn blanks<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., [' ', '\t']).parse_next(input)
}

/// Parse optional spaces.
pub(crate) fn spaces<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., ' ').parse_next(input)
}

/// Parse an optional run of spaces and newlines.
pub(crate) fn separators<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., [' ', '\n']).parse_next(input)
}

/// Parse a single newline.
pub(crate) fn newline(input: &mut &str) -> ModalResult<char> {
    '\n'.parse_next(input)
}
