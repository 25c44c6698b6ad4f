//! CSV reader (Extract phase).
//!
//! Loads the whole source into a [`Dataset`]. The first line names the
//! fields; every following line becomes one [`Record`] in row order.

use serde_json::Value;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::logging::StatusLog;
use crate::models::{Dataset, Record};

/// Field delimiter for both source and sink.
pub const DELIMITER: u8 = b',';

/// Parse CSV from a reader into a dataset.
///
/// Rows whose field count differs from the header, invalid UTF-8 and I/O
/// errors are reported as [`csv::Error`]. Blank lines are skipped. A source
/// with a header but no rows yields an empty dataset; a source with no
/// header at all, or a header that repeats a field name, is an error.
///
/// # Example
/// ```
/// use csvetl::parse_csv;
///
/// let dataset = parse_csv("name,age\nalice,30\nbob,25".as_bytes()).unwrap();
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.records()[0]["name"], "alice");
/// assert_eq!(dataset.records()[1]["age"], "25");
/// ```
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "missing header row").into());
    }
    for (i, name) in headers.iter().enumerate() {
        if headers.iter().take(i).any(|earlier| earlier == name) {
            let message = format!("duplicate header name '{name}'");
            return Err(io::Error::new(io::ErrorKind::InvalidData, message).into());
        }
    }

    let mut dataset = Dataset::new();
    for row in rdr.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();
        dataset.push(record);
    }

    Ok(dataset)
}

/// Read every record from the CSV file at `path`.
///
/// Fails with [`EtlError::SourceNotFound`] when the path does not exist or
/// is not a regular file, and with [`EtlError::ReadFailure`] for anything
/// else that goes wrong while opening or parsing.
pub fn read_csv(path: &Path, log: &dyn StatusLog) -> EtlResult<Dataset> {
    log.info(&format!("Reading records from {}", path.display()));

    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            return Err(EtlError::SourceNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(EtlError::SourceNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(_) => {}
    }

    let read_failure = |source: csv::Error| EtlError::ReadFailure {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| read_failure(e.into()))?;
    let dataset = parse_csv(file).map_err(read_failure)?;

    log.info(&format!("Read {} records", dataset.len()));
    Ok(dataset)
}
