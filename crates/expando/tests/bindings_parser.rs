//! Integration tests for bindings file parsing

use expando::{ParseErrorKind, parse_bindings};

// =========================================================================
// Simple Bindings
// =========================================================================

#[test]
fn binding_maps_name_to_name_and_value() {
    let map = parse_bindings("deps", "base >=4.7 && <5\n").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("base"), Some("base >=4.7 && <5"));
}

#[test]
fn trailing_spaces_are_trimmed_before_newline() {
    let map = parse_bindings("deps", "text >=1.2   \n").unwrap();
    assert_eq!(map.get("text"), Some("text >=1.2"));
}

#[test]
fn spaces_between_name_and_value_are_dropped() {
    let map = parse_bindings("deps", "mtl      ==2.2.*\n").unwrap();
    assert_eq!(map.get("mtl"), Some("mtl ==2.2.*"));
}

#[test]
fn multiple_bindings() {
    let map = parse_bindings("deps", "base >=4.7\ncontainers >=0.5\nmtl -any\n").unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("containers"), Some("containers >=0.5"));
    assert_eq!(map.get("mtl"), Some("mtl -any"));
}

#[test]
fn empty_file_has_no_bindings() {
    assert!(parse_bindings("deps", "").unwrap().is_empty());
}

// =========================================================================
// Quoting
// =========================================================================

#[test]
fn quoted_value_keeps_inner_spaces() {
    let map = parse_bindings("deps", "name \"a  b\"  \n").unwrap();
    assert_eq!(map.get("name"), Some("name a  b"));
}

#[test]
fn quoted_and_unquoted_parts_concatenate() {
    let map = parse_bindings("deps", "name 'x' y\n").unwrap();
    assert_eq!(map.get("name"), Some("name x y"));
}

#[test]
fn quoted_value_allows_dollar() {
    let map = parse_bindings("deps", "price \"$5\"\n").unwrap();
    assert_eq!(map.get("price"), Some("price $5"));
}

#[test]
fn quoted_value_escapes() {
    let map = parse_bindings("deps", "q \"say \\\"hi\\\"\\n\\\\\"\n").unwrap();
    assert_eq!(map.get("q"), Some("q say \"hi\"\n\\"));
}

#[test]
fn quoted_name() {
    let map = parse_bindings("deps", "\"my name\" v\n").unwrap();
    assert_eq!(map.get("my name"), Some("my name v"));
}

#[test]
fn unsupported_escape_is_an_error() {
    let err = parse_bindings("deps", "a \"x\\ty\"\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Syntax("unsupported escape sequence".to_string())
    );
    assert_eq!((err.location.line, err.location.column), (1, 6));
}

// =========================================================================
// Comments and Gaps
// =========================================================================

#[test]
fn comment_lines_and_blank_lines_are_skipped() {
    let map = parse_bindings(
        "deps",
        "-- version bounds\n\n  -- indented comment\nbase >=4.7\n\n--\n",
    )
    .unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("base"), Some("base >=4.7"));
}

#[test]
fn dollar_comment_terminates_binding() {
    let map = parse_bindings("deps", "base >=4.7 $-- pinned for ghc 8\nmtl -any\n").unwrap();
    assert_eq!(map.get("base"), Some("base >=4.7"));
    assert_eq!(map.get("mtl"), Some("mtl -any"));
}

#[test]
fn dollar_comment_on_last_line_needs_no_newline() {
    let map = parse_bindings("deps", "base >=4.7 $-- note").unwrap();
    assert_eq!(map.get("base"), Some("base >=4.7"));
}

#[test]
fn comment_without_dollar_after_value_is_part_of_value() {
    let map = parse_bindings("deps", "base >=4.7 -- not a comment\n").unwrap();
    assert_eq!(map.get("base"), Some("base >=4.7 -- not a comment"));
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn redefinition_is_reported_at_second_binding() {
    let err = parse_bindings("deps", "a 1\nb 2\na 3\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Redefinition {
            name: "a".to_string()
        }
    );
    assert_eq!(err.location.source, "deps");
    assert_eq!((err.location.line, err.location.column), (3, 1));
}

#[test]
fn redefinition_message() {
    let err = parse_bindings("deps", "a 1\na 2\n").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"deps:2:1: attempt to redefine `a`");
}

#[test]
fn missing_final_newline_is_an_error() {
    let err = parse_bindings("deps", "base >=4.7").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Syntax(_)));
    assert_eq!(err.location.line, 1);
}

#[test]
fn missing_value_is_an_error() {
    let err = parse_bindings("deps", "base\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Syntax("expected binding value".to_string())
    );
    assert_eq!((err.location.line, err.location.column), (1, 5));
}

#[test]
fn control_character_in_value_is_an_error() {
    let err = parse_bindings("deps", "base 1\t2\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Syntax("expected end of line".to_string())
    );
}

#[test]
fn name_cannot_start_with_delimiter() {
    let err = parse_bindings("deps", "ok 1\n(bad) 2\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Syntax("expected binding name".to_string())
    );
    assert_eq!((err.location.line, err.location.column), (2, 1));
}
