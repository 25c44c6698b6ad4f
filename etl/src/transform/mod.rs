//! Record transformation (Transform phase).
//!
//! - [`RecordTransform`]: the per-record rule, swappable without touching
//!   the reader or the writer
//! - [`rules`]: built-in rules ([`Uppercase`], [`Identity`])
//! - [`pipeline`]: the orchestrator running Extract, Transform and Load

pub mod pipeline;
pub mod rules;

pub use pipeline::*;
pub use rules::{Identity, Uppercase};

use crate::error::{EtlError, EtlResult};
use crate::logging::StatusLog;
use crate::models::{field_names, same_fields, Dataset, Record};

/// A pure function from one record to another.
///
/// The returned record must carry the same field names as the input.
/// Returning `Err` aborts the whole batch.
pub trait RecordTransform {
    fn apply(&self, record: &Record) -> Result<Record, String>;

    /// Name used in status lines.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> RecordTransform for F
where
    F: Fn(&Record) -> Result<Record, String>,
{
    fn apply(&self, record: &Record) -> Result<Record, String> {
        self(record)
    }
}

/// Apply `rule` to every record of `dataset`, producing a new dataset.
///
/// The output has the same length and order as the input. The first record
/// the rule rejects, or returns with a different field set, fails the batch
/// with [`EtlError::TransformFailure`]; nothing is returned in that case.
pub fn transform(
    dataset: &Dataset,
    rule: &dyn RecordTransform,
    log: &dyn StatusLog,
) -> EtlResult<Dataset> {
    log.info(&format!(
        "Applying '{}' transform to {} records",
        rule.name(),
        dataset.len()
    ));

    let transformed = dataset
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let out = rule
                .apply(record)
                .map_err(|message| EtlError::TransformFailure { row, message })?;

            if !same_fields(record, &out) {
                return Err(EtlError::TransformFailure {
                    row,
                    message: format!(
                        "rule changed fields from [{}] to [{}]",
                        field_names(record).join(", "),
                        field_names(&out).join(", ")
                    ),
                });
            }
            Ok(out)
        })
        .collect::<EtlResult<Dataset>>()?;

    log.info(&format!("Transformed {} records", transformed.len()));
    Ok(transformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLog};
    use crate::parser::parse_csv;
    use serde_json::Value;

    fn sample() -> Dataset {
        parse_csv("name,age\nalice,30\nbob,25".as_bytes()).unwrap()
    }

    #[test]
    fn test_uppercase_dataset() {
        let log = MemoryLog::new();
        let out = transform(&sample(), &Uppercase, &log).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out.field_names(), vec!["name", "age"]);
        assert_eq!(out.records()[0]["name"], "ALICE");
        assert_eq!(out.records()[1]["name"], "BOB");
        assert_eq!(out.records()[1]["age"], "25");
        assert_eq!(log.messages(LogLevel::Info).len(), 2);
    }

    #[test]
    fn test_transform_twice_equals_once() {
        let log = MemoryLog::new();
        let once = transform(&sample(), &Uppercase, &log).unwrap();
        let twice = transform(&once, &Uppercase, &log).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_untouched() {
        let log = MemoryLog::new();
        let input = sample();
        let _ = transform(&input, &Uppercase, &log).unwrap();
        assert_eq!(input.records()[0]["name"], "alice");
    }

    #[test]
    fn test_closure_rule() {
        let log = MemoryLog::new();
        let reverse = |record: &Record| -> Result<Record, String> {
            Ok(record
                .iter()
                .map(|(k, v)| {
                    let text = v.as_str().unwrap_or_default();
                    (k.clone(), Value::String(text.chars().rev().collect()))
                })
                .collect())
        };

        let out = transform(&sample(), &reverse, &log).unwrap();
        assert_eq!(out.records()[0]["name"], "ecila");
        assert_eq!(out.records()[0]["age"], "03");
    }

    #[test]
    fn test_rule_error_aborts_batch() {
        let log = MemoryLog::new();
        let fail_on_bob = |record: &Record| -> Result<Record, String> {
            if record["name"] == "bob" {
                Err("bob is not allowed".to_string())
            } else {
                Ok(record.clone())
            }
        };

        let err = transform(&sample(), &fail_on_bob, &log).unwrap_err();
        match err {
            EtlError::TransformFailure { row, message } => {
                assert_eq!(row, 1);
                assert_eq!(message, "bob is not allowed");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(log.messages(LogLevel::Info).len(), 1);
    }

    #[test]
    fn test_rule_changing_fields_fails() {
        let log = MemoryLog::new();
        let drop_age = |record: &Record| -> Result<Record, String> {
            let mut out = record.clone();
            out.remove("age");
            Ok(out)
        };

        let err = transform(&sample(), &drop_age, &log).unwrap_err();
        assert!(matches!(err, EtlError::TransformFailure { row: 0, .. }));
    }

    #[test]
    fn test_empty_dataset() {
        let log = MemoryLog::new();
        let out = transform(&Dataset::new(), &Uppercase, &log).unwrap();
        assert!(out.is_empty());
    }
}
