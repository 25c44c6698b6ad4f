//! Run configuration.
//!
//! A run is configured by exactly two paths, fixed at construction.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Source path used when none is given on the command line.
pub const DEFAULT_SOURCE: &str = "input.csv";

/// Sink path used when none is given on the command line.
pub const DEFAULT_SINK: &str = "output.csv";

/// Source and sink of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtlConfig {
    source: PathBuf,
    sink: PathBuf,
}

impl EtlConfig {
    pub fn new(source: impl Into<PathBuf>, sink: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            sink: sink.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn sink(&self) -> &Path {
        &self.sink
    }
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_SINK)
    }
}
