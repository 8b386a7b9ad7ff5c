//! Core type definitions for copy-file

mod error;
mod intent;
mod task;

pub use error::CopyError;
pub use intent::DestinationIntent;
pub use task::{CopyManifest, CopyTask};
