//! Macro expansion for text templates.
//!
//! A *bindings file* maps names to expansion text:
//!
//! ```text
//! -- version bounds
//! base       >=4.7 && <5
//! containers >=0.5 $-- any recent release
//! ```
//!
//! A *template file* mixes literal text with `${name}` references and
//! `$(include-file "path")` directives:
//!
//! ```
//! use expando::{ExpansionMap, SearchContext, parse_bindings, parse_template};
//!
//! let bindings: ExpansionMap = parse_bindings("deps", "base >=4.7 && <5\n").unwrap();
//! let context = SearchContext::new("pkg.cabal.in", &bindings);
//! let output = parse_template(&context, "pkg.cabal.in", "  build-depends: ${base}\n").unwrap();
//! assert_eq!(output, "  build-depends: base >=4.7 && <5\n");
//! ```

pub mod engine;
pub mod parser;
pub mod types;

pub use engine::{
    DiskFiles, ExpandError, Expander, FileSource, MAX_INCLUDE_DEPTH, SearchContext, parse_template,
};
pub use parser::{ParseError, ParseErrorKind, SourceLocation, parse_bindings};
pub use types::ExpansionMap;
