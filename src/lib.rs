//! # copy-file - declarative file copying
//!
//! Reads a list of source/destination pairs from a YAML (or TOML) document
//! and copies each source into place, recursing into directories and
//! overwriting existing files.

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod paths;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use types::{CopyError, CopyManifest, CopyTask, DestinationIntent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
