//! Built-in record rules.

use serde_json::Value;

use super::RecordTransform;
use crate::models::Record;

/// Upper-cases every text value. Non-text values pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uppercase;

impl RecordTransform for Uppercase {
    fn apply(&self, record: &Record) -> Result<Record, String> {
        Ok(record
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) => Value::String(s.to_uppercase()),
                    other => other.clone(),
                };
                (name.clone(), value)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "uppercase"
    }
}

/// Returns every record unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl RecordTransform for Identity {
    fn apply(&self, record: &Record) -> Result<Record, String> {
        Ok(record.clone())
    }

    fn name(&self) -> &str {
        "identity"
    }
}
