//! Domain models for the ETL run.
//!
//! - [`Record`] - One row, field name to value, in header order
//! - [`Dataset`] - All records of one run, in source row order

use serde::Serialize;
use serde_json::{Map, Value};

// =============================================================================
// Record
// =============================================================================

/// One row of data.
///
/// Keys keep insertion order (serde_json `preserve_order`), so the first
/// record of a dataset carries the header order. Values read from CSV are
/// always [`Value::String`].
pub type Record = Map<String, Value>;

/// Render a field value as CSV text.
///
/// Strings are written as-is, `null` as empty text, anything else in its
/// JSON form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Ordered field names of a record.
pub fn field_names(record: &Record) -> Vec<String> {
    record.keys().cloned().collect()
}

/// True when both records carry the same set of field names, in any order.
pub fn same_fields(a: &Record, b: &Record) -> bool {
    a.len() == b.len() && a.keys().all(|k| b.contains_key(k))
}

// =============================================================================
// Dataset
// =============================================================================

/// Ordered collection of records handled by one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Field names of the first record, in order. Empty for an empty dataset.
    pub fn field_names(&self) -> Vec<String> {
        self.records.first().map(field_names).unwrap_or_default()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
