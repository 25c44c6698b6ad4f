//! # csvetl - single-pass CSV extract, transform, load
//!
//! Reads every record of a CSV file into memory, applies a per-record rule,
//! and writes the result to another CSV file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Source CSV  │────▶│   Reader    │────▶│ Transformer │────▶│   Writer    │────▶ Sink CSV
//! │   (UTF-8)   │     │  (Extract)  │     │  (rule)     │     │   (Load)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csvetl::{EtlConfig, Pipeline, TracingLog};
//!
//! csvetl::logging::init("info");
//! let report = Pipeline::new(EtlConfig::new("input.csv", "output.csv")).run(&TracingLog);
//! println!("{:?}", report.state);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Phase error set
//! - [`models`] - Record and Dataset
//! - [`logging`] - Injected status logging
//! - [`config`] - Source and sink paths
//! - [`parser`] - CSV reader
//! - [`transform`] - Record rules and the run orchestrator
//! - [`writer`] - CSV writer

// Core modules
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

// Phases
pub mod parser;
pub mod transform;
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::EtlConfig;
pub use error::{EtlError, EtlResult, Phase};
pub use logging::{LogEntry, LogLevel, MemoryLog, StatusLog, TracingLog};
pub use models::{Dataset, Record};
pub use parser::{parse_csv, read_csv};
pub use transform::{
    transform, Identity, PhaseTimings, Pipeline, RecordTransform, RunReport, RunState, Uppercase,
};
pub use writer::{write_csv, write_records};
