//! Integration tests for the `Expander` session facade.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use expando::{ExpandError, Expander, MAX_INCLUDE_DEPTH, ParseErrorKind};
use tempfile::TempDir;

// =========================================================================
// Builder and Defaults
// =========================================================================

#[test]
fn default_expander_is_empty() {
    let expander = Expander::new();
    assert!(expander.bindings().is_empty());
    assert!(expander.search_dirs().is_empty());
    assert_eq!(expander.max_depth(), MAX_INCLUDE_DEPTH);
}

#[test]
fn builder_sets_search_dirs_and_depth() {
    let expander = Expander::builder()
        .search_dirs(vec![PathBuf::from("a"), PathBuf::from("b")])
        .max_depth(4)
        .build();
    assert_eq!(expander.search_dirs(), [PathBuf::from("a"), PathBuf::from("b")]);
    assert_eq!(expander.max_depth(), 4);
}

// =========================================================================
// Loading Bindings
// =========================================================================

#[test]
fn load_bindings_str_returns_count() {
    let mut expander = Expander::new();
    let count = expander
        .load_bindings_str("deps", "base >=4.7\nmtl -any\n")
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(expander.bindings().get("mtl"), Some("mtl -any"));
}

#[test]
fn loading_bindings_replaces_previous_ones() {
    let mut expander = Expander::new();
    expander.load_bindings_str("old", "base 1\n").unwrap();
    expander.load_bindings_str("new", "mtl 2\n").unwrap();
    assert!(!expander.bindings().contains("base"));
    assert!(expander.bindings().contains("mtl"));
}

#[test]
fn load_bindings_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deps.bindings");
    fs::write(&path, "-- bounds\nbase >=4.7 && <5\n").unwrap();

    let mut expander = Expander::new();
    assert_eq!(expander.load_bindings(&path).unwrap(), 1);
    assert_eq!(expander.bindings().get("base"), Some("base >=4.7 && <5"));
}

#[test]
fn bindings_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deps.bindings");
    fs::write(&path, "a 1\na 2\n").unwrap();

    let mut expander = Expander::new();
    let err = expander.load_bindings(&path).unwrap_err();
    let parse = err.as_parse_error().unwrap();
    assert_eq!(parse.location.source, path.display().to_string());
    assert!(matches!(parse.kind, ParseErrorKind::Redefinition { .. }));
}

#[test]
fn missing_bindings_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut expander = Expander::new();
    let err = expander
        .load_bindings(dir.path().join("missing.bindings"))
        .unwrap_err();
    assert!(matches!(err, ExpandError::Io { ref source, .. } if source.kind() == ErrorKind::NotFound));
}

// =========================================================================
// Expansion
// =========================================================================

#[test]
fn expand_file_uses_bindings_and_search_dirs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("shared")).unwrap();
    fs::write(
        dir.path().join("shared/common.inc"),
        "  build-depends: ${base}\n",
    )
    .unwrap();
    let template = dir.path().join("pkg/pkg.cabal.in");
    fs::create_dir_all(template.parent().unwrap()).unwrap();
    fs::write(
        &template,
        "name: pkg\n$-- generated\nlibrary\n$(include-file \"common.inc\")$\n  exposed-modules: Pkg\n",
    )
    .unwrap();

    let mut expander = Expander::builder()
        .search_dirs(vec![dir.path().join("shared")])
        .build();
    expander.load_bindings_str("deps", "base >=4.7 && <5\n").unwrap();

    let output = expander.expand_file(&template).unwrap();
    assert_eq!(
        output,
        "name: pkg\nlibrary\n  build-depends: base >=4.7 && <5\n  exposed-modules: Pkg\n"
    );
}

#[test]
fn expand_str_resolves_includes_next_to_source_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("part.inc"), "part\n").unwrap();
    let source_name = dir.path().join("main.in").display().to_string();

    let expander = Expander::new();
    let output = expander
        .expand_str(&source_name, "$(include-file \"part.inc\")$\nend\n")
        .unwrap();
    assert_eq!(output, "part\nend\n");
}

#[test]
fn missing_root_template_is_io_error() {
    let dir = TempDir::new().unwrap();
    let expander = Expander::new();
    let err = expander
        .expand_file(dir.path().join("missing.in"))
        .unwrap_err();
    assert!(matches!(err, ExpandError::Io { .. }));
    assert!(err.as_parse_error().is_none());
}

#[test]
fn max_depth_applies_to_expansion() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.in"), "$(include-file \"b.in\")").unwrap();
    fs::write(dir.path().join("b.in"), "b").unwrap();

    let expander = Expander::builder().max_depth(1).build();
    let err = expander.expand_file(dir.path().join("a.in")).unwrap_err();
    assert_eq!(
        err.as_parse_error().map(|e| &e.kind),
        Some(&ParseErrorKind::DepthExceeded { limit: 1 })
    );
}
