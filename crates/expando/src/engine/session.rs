//! Session facade tying bindings, search directories and file access together.

use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::debug;

use crate::engine::context::{MAX_INCLUDE_DEPTH, SearchContext};
use crate::engine::error::ExpandError;
use crate::engine::files::{DiskFiles, FileSource};
use crate::engine::template::parse_template;
use crate::parser::{ParseError, parse_bindings};
use crate::types::ExpansionMap;

/// User-facing entry point for expanding templates.
///
/// An `Expander` owns the bindings loaded from a bindings file together with
/// the include configuration, and hands out a fresh [`SearchContext`] for
/// every template it expands.
///
/// # Example
///
/// ```
/// use expando::Expander;
///
/// let mut expander = Expander::builder()
///     .search_dirs(vec!["include".into()])
///     .build();
///
/// expander.load_bindings_str("deps", "base >=4.7 && <5\n").unwrap();
///
/// let output = expander
///     .expand_str("pkg.cabal.in", "build-depends: ${base}\n")
///     .unwrap();
/// assert_eq!(output, "build-depends: base >=4.7 && <5\n");
/// ```
#[derive(Builder)]
pub struct Expander {
    /// Bindings every `${name}` is resolved against.
    #[builder(default)]
    bindings: ExpansionMap,

    /// Directories searched, in order, after the including file's own
    /// directory.
    #[builder(default)]
    search_dirs: Vec<PathBuf>,

    /// Maximum number of files being expanded at once.
    #[builder(default = MAX_INCLUDE_DEPTH)]
    max_depth: usize,

    /// How bindings, templates and includes are read.
    #[builder(default = Box::new(DiskFiles))]
    files: Box<dyn FileSource>,
}

impl Default for Expander {
    fn default() -> Self {
        Expander::builder().build()
    }
}

impl Expander {
    /// Create an expander with no bindings that reads from disk.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &ExpansionMap {
        &self.bindings
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Load bindings from a file, replacing any loaded before.
    ///
    /// Returns the number of bindings.
    pub fn load_bindings(&mut self, path: impl AsRef<Path>) -> Result<usize, ExpandError> {
        let path = path.as_ref();
        let content = self.read(path)?;
        Ok(self.load_bindings_str(&path.display().to_string(), &content)?)
    }

    /// Load bindings from text, replacing any loaded before.
    ///
    /// `source_name` is only used in error locations.
    pub fn load_bindings_str(
        &mut self,
        source_name: &str,
        content: &str,
    ) -> Result<usize, ParseError> {
        self.bindings = parse_bindings(source_name, content)?;
        Ok(self.bindings.len())
    }

    /// Create the root search context for expanding the file at `root`.
    pub fn context(&self, root: impl Into<PathBuf>) -> SearchContext<'_> {
        SearchContext::new(root, &self.bindings)
            .with_search_dirs(&self.search_dirs)
            .with_files(self.files.as_ref())
            .with_max_depth(self.max_depth)
    }

    /// Expand template text that lives at the path `source_name`.
    ///
    /// Relative includes resolve against the directory of `source_name`.
    pub fn expand_str(&self, source_name: &str, text: &str) -> Result<String, ExpandError> {
        parse_template(&self.context(source_name), source_name, text)
    }

    /// Read and expand the template file at `path`.
    ///
    /// Failing to read the root template, including it not existing, is an
    /// [`ExpandError::Io`].
    pub fn expand_file(&self, path: impl AsRef<Path>) -> Result<String, ExpandError> {
        let path = path.as_ref();
        let content = self.read(path)?;
        debug!(file = %path.display(), "expanding template");
        parse_template(&self.context(path), &path.display().to_string(), &content)
    }

    fn read(&self, path: &Path) -> Result<String, ExpandError> {
        self.files
            .read_to_string(path)
            .map_err(|source| ExpandError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}
