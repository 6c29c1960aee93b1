//! Bindings and lexical grammar for expando.
//!
//! This module provides the text primitives shared by both input grammars,
//! the bindings file parser, and the positioned error type every parse
//! failure is reported with.

mod bindings;
pub mod error;
pub(crate) mod text;

pub use bindings::parse_bindings;
pub use error::{ParseError, ParseErrorKind, SourceLocation};
