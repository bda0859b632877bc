//! Delimited-text reader for parts uploads.
//!
//! Uploads are semicolon-delimited by default with a mandatory header row.
//! Every cell is read as text; numeric conversion is the normalizer's job.

use crate::error::{EngineError, ErrorContext, ParseErrorKind, Result};
use crate::model::{Cell, PartRow, PartsTable};
use std::io::Read;
use std::path::Path;

/// Default field delimiter for uploads.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Read a parts table from any reader.
pub fn read_parts_table<R: Read>(reader: R, delimiter: u8) -> Result<PartsTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut seen = std::collections::HashSet::new();
    if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(EngineError::parse(
            "reading header row",
            ParseErrorKind::DuplicateColumn(duplicate.clone()),
        ));
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let mut row = PartRow::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), Cell::Text(value.to_string()));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(EngineError::parse(
            "reading delimited text",
            ParseErrorKind::EmptyTable,
        ));
    }

    tracing::debug!(
        "Read {} rows with {} columns",
        rows.len(),
        headers.len()
    );

    Ok(PartsTable::new(headers, rows))
}

/// Read a parts table from a string.
pub fn read_parts_str(content: &str, delimiter: u8) -> Result<PartsTable> {
    read_parts_table(content.as_bytes(), delimiter)
}

/// Read a parts table from a file on disk.
pub fn read_parts_file(path: &Path, delimiter: u8) -> Result<PartsTable> {
    let file = std::fs::File::open(path).map_err(|e| EngineError::io(path, e))?;
    read_parts_table(std::io::BufReader::new(file), delimiter)
        .with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_semicolon_table() {
        let content = "Part Number;Title;Installs;Marcone\nWR55X10025;Thermistor;12;$1,234.50\n";
        let table = read_parts_str(content, DEFAULT_DELIMITER).unwrap();
        assert_eq!(table.headers(), ["Part Number", "Title", "Installs", "Marcone"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(
            table.rows()[0].get("Marcone"),
            Some(&Cell::Text("$1,234.50".to_string()))
        );
    }

    #[test]
    fn test_quoted_fields_keep_delimiters() {
        let content = "Part Number;Title\nA1;\"Door; left\"\n";
        let table = read_parts_str(content, DEFAULT_DELIMITER).unwrap();
        assert_eq!(table.rows()[0].text("Title"), "Door; left");
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let err = read_parts_str("Part Number;Title\n", DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse {
                source: ParseErrorKind::EmptyTable,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_header_is_rejected() {
        let content = "Part Number;Title;Installs;Marcone;Marcone\nA1;Door;3;$1.00;$9.00\n";
        let err = read_parts_str(content, DEFAULT_DELIMITER).unwrap_err();
        match err {
            EngineError::Parse {
                source: ParseErrorKind::DuplicateColumn(column),
                ..
            } => assert_eq!(column, "Marcone"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let content = "Part Number;Title\nA1;Door;extra\n";
        let err = read_parts_str(content, DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse {
                source: ParseErrorKind::Delimited(_),
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_parts_file(Path::new("/nonexistent/parts.csv"), b';').unwrap_err();
        assert!(matches!(err, EngineError::Io { path: Some(_), .. }));
    }
}
