//! CSV writer (Load phase).

use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::logging::StatusLog;
use crate::models::{field_names, same_fields, value_to_text, Dataset};
use crate::parser::DELIMITER;

#[cfg(windows)]
const TERMINATOR: csv::Terminator = csv::Terminator::CRLF;
#[cfg(not(windows))]
const TERMINATOR: csv::Terminator = csv::Terminator::Any(b'\n');

/// Check that every record carries the first record's field set.
fn check_consistent(dataset: &Dataset) -> EtlResult<()> {
    let Some(first) = dataset.records().first() else {
        return Ok(());
    };

    for (row, record) in dataset.iter().enumerate().skip(1) {
        if !same_fields(first, record) {
            return Err(EtlError::InconsistentRecord {
                row,
                expected: field_names(first),
                found: field_names(record),
            });
        }
    }
    Ok(())
}

/// Serialize a dataset as CSV into any writer.
///
/// Writes the header from the first record's field order, then one row per
/// record with values in that same order. Writes nothing for an empty dataset.
pub fn write_records<W: std::io::Write>(
    dataset: &Dataset,
    writer: W,
) -> Result<(), csv::Error> {
    if dataset.is_empty() {
        return Ok(());
    }
    let header = dataset.field_names();

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(TERMINATOR)
        .from_writer(writer);

    wtr.write_record(&header)?;
    for record in dataset {
        wtr.write_record(header.iter().map(|name| {
            record.get(name).map(value_to_text).unwrap_or_default()
        }))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `dataset` to the CSV file at `path`, creating or truncating it.
///
/// An empty dataset is reported as a warning and leaves an empty sink, with
/// no header. Records whose field set differs from the first record's are
/// rejected with [`EtlError::InconsistentRecord`] before the sink is opened.
pub fn write_csv(dataset: &Dataset, path: &Path, log: &dyn StatusLog) -> EtlResult<()> {
    let write_failure = |source: csv::Error| EtlError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    if dataset.is_empty() {
        log.warn(&format!("No records to write, {} emptied", path.display()));
        std::fs::File::create(path).map_err(|e| write_failure(e.into()))?;
        return Ok(());
    }

    log.info(&format!(
        "Writing {} records to {}",
        dataset.len(),
        path.display()
    ));

    check_consistent(dataset)?;

    let file = std::fs::File::create(path).map_err(|e| write_failure(e.into()))?;
    write_records(dataset, file).map_err(write_failure)?;

    log.info(&format!("Wrote {} records to {}", dataset.len(), path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLog};
    use crate::models::Record;
    use crate::parser::parse_csv;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::tempdir;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn to_string(dataset: &Dataset) -> String {
        let mut buf = Vec::new();
        write_records(dataset, &mut buf).unwrap();
        String::from_utf8(buf).unwrap().replace("\r\n", "\n")
    }

    #[test]
    fn test_header_then_rows() {
        let dataset = Dataset::from(vec![
            record(json!({"name": "ALICE", "age": "30"})),
            record(json!({"name": "BOB", "age": "25"})),
        ]);
        assert_eq!(to_string(&dataset), "name,age\nALICE,30\nBOB,25\n");
    }

    #[test]
    fn test_later_records_follow_first_field_order() {
        let dataset = Dataset::from(vec![
            record(json!({"name": "a", "age": "1"})),
            record(json!({"age": "2", "name": "b"})),
        ]);
        assert_eq!(to_string(&dataset), "name,age\na,1\nb,2\n");
    }

    #[test]
    fn test_quoting() {
        let dataset = Dataset::from(vec![record(json!({"note": "a, b", "q": "say \"hi\""}))]);
        assert_eq!(to_string(&dataset), "note,q\n\"a, b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_non_text_values() {
        let dataset = Dataset::from(vec![record(json!({"n": 7, "none": null}))]);
        assert_eq!(to_string(&dataset), "n,none\n7,\n");
    }

    #[test]
    fn test_write_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let dataset = parse_csv("name,age\nALICE,30\n".as_bytes()).unwrap();

        let log = MemoryLog::new();
        write_csv(&dataset, &path, &log).unwrap();

        let content = fs::read_to_string(&path).unwrap().replace("\r\n", "\n");
        assert_eq!(content, "name,age\nALICE,30\n");
        assert_eq!(log.messages(LogLevel::Info).len(), 2);
        assert!(log.messages(LogLevel::Warning).is_empty());
    }

    #[test]
    fn test_overwrites_existing_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old,content\n1,2\n3,4\n5,6\n").unwrap();

        let dataset = parse_csv("a\nx\n".as_bytes()).unwrap();
        write_csv(&dataset, &path, &MemoryLog::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap().replace("\r\n", "\n");
        assert_eq!(content, "a\nx\n");
    }

    #[test]
    fn test_empty_dataset_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let log = MemoryLog::new();
        write_csv(&Dataset::new(), &path, &log).unwrap();

        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(log.messages(LogLevel::Warning).len(), 1);
        assert!(log.messages(LogLevel::Info).is_empty());
    }

    #[test]
    fn test_empty_dataset_truncates_existing_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old,data\n1,2\n").unwrap();

        write_csv(&Dataset::new(), &path, &MemoryLog::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_empty_dataset_unwritable_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");

        let err = write_csv(&Dataset::new(), &path, &MemoryLog::new()).unwrap_err();
        assert!(matches!(err, EtlError::WriteFailure { .. }));
    }

    #[test]
    fn test_inconsistent_record_rejected_before_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let dataset = Dataset::from(vec![
            record(json!({"name": "a", "age": "1"})),
            record(json!({"name": "b"})),
        ]);

        let err = write_csv(&dataset, &path, &MemoryLog::new()).unwrap_err();
        match err {
            EtlError::InconsistentRecord { row, expected, found } => {
                assert_eq!(row, 1);
                assert_eq!(expected, vec!["name", "age"]);
                assert_eq!(found, vec!["name"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let dataset = parse_csv("a\nx\n".as_bytes()).unwrap();

        let err = write_csv(&dataset, &path, &MemoryLog::new()).unwrap_err();
        assert!(matches!(err, EtlError::WriteFailure { .. }));
    }
}
