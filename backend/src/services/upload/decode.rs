use crate::errors::SyncError;
use crate::sync::datetime;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use common::model::lead::LeadTable;
use std::io::Cursor;

/// Tabular formats accepted by `/upload`, chosen by file-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Option<FileKind> {
        if filename.ends_with(".csv") {
            Some(FileKind::Csv)
        } else if filename.ends_with(".xlsx") {
            Some(FileKind::Xlsx)
        } else {
            None
        }
    }
}

pub fn decode(kind: FileKind, bytes: &[u8]) -> Result<LeadTable, SyncError> {
    match kind {
        FileKind::Csv => decode_csv(bytes),
        FileKind::Xlsx => decode_xlsx(bytes),
    }
}

/// First row is the header. Ragged rows are accepted and padded on lookup.
fn decode_csv(bytes: &[u8]) -> Result<LeadTable, SyncError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SyncError::Decode("No columns to parse from file".to_string()));
    }

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(LeadTable::from_records(headers, records))
}

/// Reads the first worksheet; its first used row is the header.
fn decode_xlsx(bytes: &[u8]) -> Result<LeadTable, SyncError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SyncError::Decode("workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => return Err(SyncError::Decode("No columns to parse from file".to_string())),
    };
    let records = rows.map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    Ok(LeadTable::from_records(headers, records))
}

/// Cell rendered as the text a CSV export of the same sheet would carry.
/// Date cells go through the shared datetime format so they compare with
/// worksheet values.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ts| datetime::format(Some(ts)))
            .unwrap_or_else(|| dt.as_f64().to_string()),
    }
}
