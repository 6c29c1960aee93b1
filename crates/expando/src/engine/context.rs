//! Search context threaded through template expansion.

use std::path::{Path, PathBuf};

use crate::engine::files::{DiskFiles, FileSource};
use crate::types::ExpansionMap;

/// Default limit on the number of files being expanded at once.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// Per-parse configuration carried through recursive expansion.
///
/// The context holds:
/// - The bindings every `${name}` is looked up in
/// - Additional include search directories, in priority order
/// - The inclusion stack, root file first, used for cycle and depth checks
/// - The file capability includes are read through
///
/// A context is never mutated while expanding. Entering an include derives a
/// new context with a longer stack, so sibling includes never see each
/// other's files.
#[derive(Clone)]
pub struct SearchContext<'a> {
    bindings: &'a ExpansionMap,
    search_dirs: &'a [PathBuf],
    stack: Vec<PathBuf>,
    files: &'a dyn FileSource,
    max_depth: usize,
}

impl<'a> SearchContext<'a> {
    /// Create a context for expanding `root` with `bindings`.
    ///
    /// Uses no extra search directories, reads from disk and allows
    /// [`MAX_INCLUDE_DEPTH`] nested files.
    pub fn new(root: impl Into<PathBuf>, bindings: &'a ExpansionMap) -> Self {
        Self {
            bindings,
            search_dirs: &[],
            stack: vec![root.into()],
            files: &DiskFiles,
            max_depth: MAX_INCLUDE_DEPTH,
        }
    }

    /// Use `search_dirs` after the including file's own directory.
    pub fn with_search_dirs(mut self, search_dirs: &'a [PathBuf]) -> Self {
        self.search_dirs = search_dirs;
        self
    }

    /// Read include files through `files`.
    pub fn with_files(mut self, files: &'a dyn FileSource) -> Self {
        self.files = files;
        self
    }

    /// Set the inclusion depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn bindings(&self) -> &'a ExpansionMap {
        self.bindings
    }

    pub fn search_dirs(&self) -> &'a [PathBuf] {
        self.search_dirs
    }

    pub fn files(&self) -> &'a dyn FileSource {
        self.files
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Files currently being expanded, root first.
    pub fn stack(&self) -> &[PathBuf] {
        &self.stack
    }

    /// Number of files currently being expanded.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The file currently being expanded.
    pub fn current_file(&self) -> &Path {
        // The root is pushed on construction and the stack only grows.
        self.stack.last().map_or(Path::new(""), PathBuf::as_path)
    }

    /// Check if `path` is already being expanded (cycle detection).
    pub fn is_on_stack(&self, path: &Path) -> bool {
        self.stack.iter().any(|entry| entry == path)
    }

    /// Paths to try for an include of `file`, in order: next to the current
    /// file, then inside each search directory.
    pub fn candidates(&self, file: &Path) -> Vec<PathBuf> {
        let base = self.current_file().parent().unwrap_or(Path::new(""));
        let mut candidates = Vec::with_capacity(1 + self.search_dirs.len());
        candidates.push(base.join(file));
        candidates.extend(self.search_dirs.iter().map(|dir| dir.join(file)));
        candidates
    }

    /// Derive the context for expanding `path` from within this one.
    pub fn enter(&self, path: PathBuf) -> SearchContext<'a> {
        let mut stack = self.stack.clone();
        stack.push(path);
        SearchContext {
            bindings: self.bindings,
            search_dirs: self.search_dirs,
            stack,
            files: self.files,
            max_depth: self.max_depth,
        }
    }
}
