//! Executor module for file operations

pub mod copy;
pub mod dir;

pub use copy::copy_file;
pub use dir::{copy_dir, CopyStats, FileCallback};
