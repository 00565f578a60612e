// src/xlsx/mod.rs

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::process::{convert::CellValue, pivot::PromoRecord};
use crate::schema::Column;

/// Header on row 0, one row per record after it. Absent and empty-text
/// cells are left blank.
pub fn fill_sheet(
    worksheet: &mut Worksheet,
    columns: &[Column],
    records: &[PromoRecord],
) -> Result<()> {
    for (col, column) in (0u16..).zip(columns) {
        worksheet
            .write_string(0, col, column.header())
            .with_context(|| format!("writing header {}", column.header()))?;
    }

    for (row, record) in (1u32..).zip(records) {
        for (col, column) in (0u16..).zip(columns) {
            match record.cell(*column) {
                None => {}
                Some(CellValue::Text(text)) if text.is_empty() => {}
                Some(CellValue::Text(text)) => {
                    worksheet.write_string(row, col, &text).with_context(|| {
                        format!("writing {} for {}", column.header(), record.manager)
                    })?;
                }
                Some(CellValue::Integer(n)) => {
                    worksheet.write_number(row, col, n as f64)?;
                }
                Some(CellValue::Decimal(x)) => {
                    worksheet.write_number(row, col, x)?;
                }
            }
        }
    }
    debug!(rows = records.len() + 1, "sheet filled");
    Ok(())
}

/// Write `records` as a single-sheet workbook, replacing any existing file.
///
/// The sheet name is validated before anything touches the disk.
#[tracing::instrument(level = "info", skip(path, columns, records), fields(path = %path.as_ref().display(), records = records.len()))]
pub fn write_xlsx<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    columns: &[Column],
    records: &[PromoRecord],
) -> Result<()> {
    let path = path.as_ref();

    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(sheet_name.trim())
        .with_context(|| format!("invalid sheet name {:?}", sheet_name))?;
    fill_sheet(worksheet, columns, records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("saving workbook {:?}", path))?;

    info!("workbook written");
    Ok(())
}
