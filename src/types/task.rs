//! CopyTask - one source/destination pair from the configuration

use serde::Deserialize;

/// A declared copy instruction
///
/// Both paths are raw strings and may still contain `$VAR` references.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CopyTask {
    pub source: String,
    pub destination: String,
}

/// Parsed configuration document
///
/// Only the `copy-file` key is recognized; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CopyManifest {
    #[serde(rename = "copy-file", default)]
    pub tasks: Vec<CopyTask>,
}

impl CopyManifest {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
