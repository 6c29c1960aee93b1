//! Resolution of `$(include-file "path")`.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, trace};

use crate::engine::context::SearchContext;
use crate::engine::error::ExpandError;
use crate::engine::template::parse_template;
use crate::parser::{ParseError, ParseErrorKind, SourceLocation};

/// Run the `include-file` directive with its arguments.
pub(crate) fn include_file(
    context: &SearchContext<'_>,
    args: &[String],
    location: &SourceLocation,
) -> Result<String, ExpandError> {
    let [file] = args else {
        return Err(fail(location, ParseErrorKind::IncludeArity { got: args.len() }));
    };
    if file.is_empty() {
        return Err(fail(
            location,
            ParseErrorKind::Syntax("include-file needs a non-empty file name".to_string()),
        ));
    }
    resolve_include(context, file, location)
}

/// Find `file` and expand it in a context extended with the found path.
///
/// Candidates are tried in order: next to the including file, then inside
/// each search directory. The first candidate that exists wins. A candidate
/// already on the inclusion stack stops the search with a cycle error, and
/// any read failure other than "not found" is fatal.
fn resolve_include(
    context: &SearchContext<'_>,
    file: &str,
    location: &SourceLocation,
) -> Result<String, ExpandError> {
    if context.depth() >= context.max_depth() {
        return Err(fail(
            location,
            ParseErrorKind::DepthExceeded {
                limit: context.max_depth(),
            },
        ));
    }

    for candidate in context.candidates(Path::new(file)) {
        if context.is_on_stack(&candidate) {
            let mut chain = context.stack().to_vec();
            chain.push(candidate);
            return Err(fail(location, ParseErrorKind::RecursiveInclude { chain }));
        }

        let text = match context.files().read_to_string(&candidate) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(candidate = %candidate.display(), "include candidate not found");
                continue;
            }
            Err(source) => {
                return Err(ExpandError::Io {
                    path: candidate,
                    source,
                });
            }
        };

        let source_name = candidate.display().to_string();
        let child = context.enter(candidate);
        debug!(file = %source_name, depth = child.depth(), "expanding include");
        return parse_template(&child, &source_name, &text);
    }

    Err(fail(
        location,
        ParseErrorKind::IncludeNotFound {
            file: file.to_string(),
        },
    ))
}

fn fail(location: &SourceLocation, kind: ParseErrorKind) -> ExpandError {
    ParseError::new(location.clone(), kind).into()
}
