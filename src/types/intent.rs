//! DestinationIntent - what an existing destination path means for a task

use std::io::ErrorKind;
use std::path::Path;

/// Destination type, decided once per task before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationIntent {
    /// Destination exists and is a directory
    AsDirectory,

    /// Destination exists and is not a directory
    AsFile,

    /// Destination does not exist yet
    Unknown,
}

impl DestinationIntent {
    /// Probe the filesystem for `dest`
    ///
    /// Errors other than "not found" are returned so the caller can treat
    /// them as fatal.
    pub fn probe(dest: &Path) -> std::io::Result<Self> {
        match std::fs::metadata(dest) {
            Ok(meta) if meta.is_dir() => Ok(DestinationIntent::AsDirectory),
            Ok(_) => Ok(DestinationIntent::AsFile),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DestinationIntent::Unknown),
            Err(e) => Err(e),
        }
    }
}
