//! Error types for copy-file

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for copy-file operations
#[derive(Debug, Error)]
pub enum CopyError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is missing
    #[error("The configuration file does not exist: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration path points at a directory
    #[error("The configuration file can not be a directory: {path}")]
    ConfigIsDirectory { path: PathBuf },

    /// Configuration file could not be read
    #[error("Could not read configuration file {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// Configuration document is malformed
    #[error("Could not parse configuration file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Absolute path resolution failed
    #[error("Could not resolve path '{input}': {source}")]
    PathResolve { input: String, source: io::Error },

    /// Source file could not be opened
    #[error("Could not open source file {path}: {source}")]
    SourceOpen { path: PathBuf, source: io::Error },

    /// Destination file could not be created or truncated
    #[error("Could not create destination file {path}: {source}")]
    DestinationCreate { path: PathBuf, source: io::Error },

    /// Byte transfer failed
    #[error("Could not copy file {src} to {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        source: io::Error,
    },

    /// Destination could not be synced to disk
    #[error("Could not flush to disk {path}: {source}")]
    Flush { path: PathBuf, source: io::Error },

    /// Directory could not be created
    #[error("Could not create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// Directory listing failed
    #[error("Could not read directory {path}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },

    /// Directory source targets an existing non-directory
    #[error("Destination exists but it is not a directory: {path}")]
    DestinationNotDirectory { path: PathBuf },

    /// Source and destination are the same file
    #[error("Source and destination are the same file: {path}")]
    SameFile { path: PathBuf },

    /// Directory destination lies inside its own source
    #[error("Destination {dest} is inside source directory {src}")]
    DestinationInsideSource { src: PathBuf, dest: PathBuf },

    /// Task source does not exist (task is skipped)
    #[error("Source file does not exist: {path}")]
    SourceMissing { path: PathBuf },
}

impl CopyError {
    /// Check if this error only skips the current task
    pub fn is_tolerated(&self) -> bool {
        matches!(self, CopyError::SourceMissing { .. })
    }

    /// Check if this error aborts the whole run
    pub fn is_fatal(&self) -> bool {
        !self.is_tolerated()
    }

    /// Check if this error came from locating or parsing the configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CopyError::ConfigNotFound { .. }
                | CopyError::ConfigIsDirectory { .. }
                | CopyError::ConfigRead { .. }
                | CopyError::ConfigParse { .. }
        )
    }
}
