//! Run orchestration: Extract, Transform, Load.
//!
//! # Example
//!
//! ```rust,no_run
//! use csvetl::{EtlConfig, Pipeline, TracingLog};
//!
//! let pipeline = Pipeline::new(EtlConfig::new("input.csv", "output.csv"));
//! let report = pipeline.run(&TracingLog);
//!
//! if report.is_success() {
//!     println!("Wrote {} records", report.records_written);
//! }
//! ```
//!
//! A run moves through `Start -> Extracted -> Transformed -> Loaded -> Done`.
//! The first phase error moves it to `Failed(phase)`; the error is logged and
//! kept in the [`RunReport`], never returned or re-raised.

use serde::Serialize;
use std::time::Instant;

use super::{transform, RecordTransform, Uppercase};
use crate::config::EtlConfig;
use crate::error::{EtlError, EtlResult, Phase};
use crate::logging::StatusLog;
use crate::parser::read_csv;
use crate::writer::write_csv;

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "phase", rename_all = "snake_case")]
pub enum RunState {
    Start,
    Extracted,
    Transformed,
    Loaded,
    Done,
    Failed(Phase),
}

/// Wall-clock time spent in each phase, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhaseTimings {
    pub extract_ms: u64,
    pub transform_ms: u64,
    pub load_ms: u64,
}

/// Outcome of one run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Final state: `Done` or `Failed(phase)`.
    pub state: RunState,

    /// Records produced by the reader.
    pub records_read: usize,

    /// Records handed to the writer (0 until Load succeeds).
    pub records_written: usize,

    pub timings: PhaseTimings,

    /// The error that failed the run, if any.
    #[serde(skip_serializing)]
    pub error: Option<EtlError>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            state: RunState::Start,
            records_read: 0,
            records_written: 0,
            timings: PhaseTimings::default(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == RunState::Done
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// A configured ETL run.
///
/// Defaults to the [`Uppercase`] rule; any [`RecordTransform`] can be
/// substituted with [`Pipeline::with_transform`].
pub struct Pipeline {
    config: EtlConfig,
    rule: Box<dyn RecordTransform>,
}

impl Pipeline {
    pub fn new(config: EtlConfig) -> Self {
        Self::with_transform(config, Uppercase)
    }

    pub fn with_transform(config: EtlConfig, rule: impl RecordTransform + 'static) -> Self {
        Self {
            config,
            rule: Box::new(rule),
        }
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Run all three phases in order and report the outcome.
    ///
    /// Phase errors are logged with their phase and recorded in the report;
    /// this method itself never fails.
    pub fn run(&self, log: &dyn StatusLog) -> RunReport {
        log.info(&format!(
            "Starting ETL run: {} -> {}",
            self.config.source().display(),
            self.config.sink().display()
        ));

        let mut report = RunReport::new();
        match self.execute(log, &mut report) {
            Ok(()) => {
                report.state = RunState::Done;
                log.info(&format!(
                    "ETL run completed: {} records written to {}",
                    report.records_written,
                    self.config.sink().display()
                ));
            }
            Err(err) => {
                let phase = err.phase();
                log.error(&format!("{phase} phase failed ({}): {err}", err.kind()));
                report.state = RunState::Failed(phase);
                report.error = Some(err);
            }
        }
        report
    }

    fn execute(&self, log: &dyn StatusLog, report: &mut RunReport) -> EtlResult<()> {
        let started = Instant::now();
        let extracted = read_csv(self.config.source(), log)?;
        report.timings.extract_ms = elapsed_ms(started);
        report.records_read = extracted.len();
        report.state = RunState::Extracted;

        let started = Instant::now();
        let transformed = transform(&extracted, self.rule.as_ref(), log)?;
        drop(extracted);
        report.timings.transform_ms = elapsed_ms(started);
        report.state = RunState::Transformed;

        let started = Instant::now();
        write_csv(&transformed, self.config.sink(), log)?;
        report.timings.load_ms = elapsed_ms(started);
        report.records_written = transformed.len();
        report.state = RunState::Loaded;

        Ok(())
    }
}
