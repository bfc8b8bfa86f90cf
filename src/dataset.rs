//! CSV datasets of simulation records.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

/// One CSV row, keyed by column name. Empty cells are left out.
pub type Record = BTreeMap<String, f64>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: column '{column}' is not a number ('{value}')")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, DatasetError> {
    let rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    collect_records(rdr)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, DatasetError> {
    let rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    collect_records(rdr)
}

fn collect_records<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Record>, DatasetError> {
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let row = row?;
        let mut record = Record::new();
        for (column, cell) in headers.iter().zip(row.iter()) {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| DatasetError::InvalidNumber {
                row: index + 1,
                column: column.to_string(),
                value: cell.to_string(),
            })?;
            record.insert(column.trim().to_string(), value);
        }
        records.push(record);
    }
    Ok(records)
}

/// Values of `key` across records, skipping records without it.
pub fn column(records: &[Record], key: &str) -> Vec<f64> {
    records.iter().filter_map(|r| r.get(key).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_are_missing_fields() {
        let csv = "time,position,radius\n0,0,\n30,210,1200\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(!records[0].contains_key("radius"));
        assert_eq!(records[1]["radius"], 1200.0);
        assert_eq!(column(&records, "radius"), vec![1200.0]);
    }

    #[test]
    fn non_numeric_cells_are_reported() {
        let csv = "time,position\n0,abc\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidNumber { row: 1, .. }));
    }
}
