//! File access used by the include resolver.

use std::fs;
use std::io;
use std::path::Path;

/// Capability to read a file as UTF-8 text.
///
/// Implementations must report a missing file with
/// [`io::ErrorKind::NotFound`]; the include resolver moves on to the next
/// candidate for that kind only and treats every other error as fatal.
pub trait FileSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFiles;

impl FileSource for DiskFiles {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}
