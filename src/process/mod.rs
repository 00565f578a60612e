// src/process/mod.rs
pub mod convert;
pub mod date_parser;
pub mod pivot;
pub mod utils;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{fs, io::Cursor, path::Path};
use tracing::{debug, info};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A wide export as read from disk, before any pivoting.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// First record: label column header followed by one manager per column.
    pub header: Vec<String>,
    /// Every following record, in file order. Field counts may differ.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Number of data (manager) columns.
    pub fn data_columns(&self) -> usize {
        self.header.len().saturating_sub(1)
    }
}

/// Read a delimited wide CSV file into memory.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_wide_csv<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<RawTable> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("Failed to read CSV file: {:?}", path))?;
    let table = parse_wide_csv(&data, delimiter)
        .with_context(|| format!("Failed to parse CSV file: {:?}", path))?;
    info!(
        managers = table.data_columns(),
        rows = table.rows.len(),
        "loaded wide table"
    );
    Ok(table)
}

/// Parse an in-memory buffer; a leading UTF-8 BOM is ignored.
pub fn parse_wide_csv(data: &[u8], delimiter: u8) -> Result<RawTable> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(Cursor::new(data));

    let mut records = rdr.records();
    let header: Vec<String> = match records.next() {
        Some(first) => first
            .context("CSV parse error in header record")?
            .iter()
            .map(str::to_string)
            .collect(),
        None => bail!("CSV input has no header record"),
    };

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(columns = header.len(), rows = rows.len(), "parsed csv");

    Ok(RawTable { header, rows })
}
