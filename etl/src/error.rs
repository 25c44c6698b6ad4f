//! Error types for the ETL run.
//!
//! Every failure belongs to exactly one [`Phase`]:
//!
//! - [`EtlError::SourceNotFound`] / [`EtlError::ReadFailure`] - Extract
//! - [`EtlError::TransformFailure`] - Transform
//! - [`EtlError::InconsistentRecord`] / [`EtlError::WriteFailure`] - Load
//!
//! Phase functions return these as values; the orchestrator matches on
//! the variant to decide how the run ends.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Phases
// =============================================================================

/// One of the three steps of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Extract,
    Transform,
    Load,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Extract => "Extract",
            Phase::Transform => "Transform",
            Phase::Load => "Load",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by the reader, transformer and writer.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The source path does not resolve to a readable file.
    #[error("source not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// I/O, CSV syntax or encoding error while reading the source.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The transformation rule rejected a record.
    #[error("transform failed on record {row}: {message}")]
    TransformFailure { row: usize, message: String },

    /// A record does not carry the same field set as the first record.
    #[error("record {row} has fields [{}], expected [{}]", .found.join(", "), .expected.join(", "))]
    InconsistentRecord {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// I/O error while writing the sink.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl EtlError {
    /// The phase this error fails.
    pub fn phase(&self) -> Phase {
        match self {
            EtlError::SourceNotFound { .. } | EtlError::ReadFailure { .. } => Phase::Extract,
            EtlError::TransformFailure { .. } => Phase::Transform,
            EtlError::InconsistentRecord { .. } | EtlError::WriteFailure { .. } => Phase::Load,
        }
    }

    /// Stable short name, used in log lines and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            EtlError::SourceNotFound { .. } => "SourceNotFound",
            EtlError::ReadFailure { .. } => "ReadFailure",
            EtlError::TransformFailure { .. } => "TransformFailure",
            EtlError::InconsistentRecord { .. } => "InconsistentRecord",
            EtlError::WriteFailure { .. } => "WriteFailure",
        }
    }
}

/// Result type for phase operations.
pub type EtlResult<T> = Result<T, EtlError>;
