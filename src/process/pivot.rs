use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::convert::{clean_number, clean_percentage, CellValue};
use super::date_parser::parse_date_range;
use super::utils::{clean_text, normalise_whitespace, value_at};
use super::RawTable;
use crate::schema::{Column, FieldClass, LabelMap, Target};

/// One manager's campaign, cleaned and typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromoRecord {
    pub manager: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub network: Option<String>,
    pub product: Option<String>,
    pub reference_month: Option<String>,
    pub promo_month: Option<String>,
    pub sales_uah: Option<CellValue>,
    pub sales_units: Option<CellValue>,
    pub margin_pct: Option<f64>,
    pub discount_pct: Option<f64>,
}

impl PromoRecord {
    /// The value written under `column`, if any.
    pub fn cell(&self, column: Column) -> Option<CellValue> {
        let text = |v: &Option<String>| v.clone().map(CellValue::Text);
        match column {
            Column::Manager => Some(CellValue::Text(self.manager.clone())),
            Column::StartDate => text(&self.start_date),
            Column::EndDate => text(&self.end_date),
            Column::Network => text(&self.network),
            Column::Product => text(&self.product),
            Column::ReferenceMonth => text(&self.reference_month),
            Column::PromoMonth => text(&self.promo_month),
            Column::SalesUah => self.sales_uah.clone(),
            Column::SalesUnits => self.sales_units.clone(),
            Column::MarginPct => self.margin_pct.map(CellValue::Decimal),
            Column::DiscountPct => self.discount_pct.map(CellValue::Decimal),
        }
    }

    fn set_text(&mut self, column: Column, value: Option<String>) {
        match column {
            Column::StartDate => self.start_date = value,
            Column::EndDate => self.end_date = value,
            Column::Network => self.network = value,
            Column::Product => self.product = value,
            Column::ReferenceMonth => self.reference_month = value,
            Column::PromoMonth => self.promo_month = value,
            _ => {}
        }
    }
}

/// Keys are the workbook headers, in workbook order; absent values are `null`.
impl Serialize for PromoRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Column::ALL.len()))?;
        for column in Column::ALL {
            map.serialize_entry(column.header(), &self.cell(column))?;
        }
        map.end()
    }
}

/// Pivot the wide table: one record per data column, in header order.
pub fn build_records(table: &RawTable, labels: &LabelMap) -> Vec<PromoRecord> {
    let mut records = Vec::with_capacity(table.data_columns());

    for col_idx in 1..table.header.len() {
        let mut manager = normalise_whitespace(&table.header[col_idx]);
        if manager.is_empty() {
            manager = format!("Менеджер {}", col_idx);
        }

        let mut record = PromoRecord {
            manager,
            ..Default::default()
        };
        // last occurrence of a label wins
        let mut raw: HashMap<Column, String> = HashMap::new();

        for row in &table.rows {
            let Some(first) = row.first() else {
                continue;
            };
            let label = normalise_whitespace(first);
            if label.is_empty() {
                continue;
            }
            let value = value_at(row, col_idx);
            match labels.resolve(&label) {
                Some(Target::DateRange) => {
                    let (start, end) = parse_date_range(value);
                    if start.is_none() && !normalise_whitespace(value).is_empty() {
                        warn!(manager = %record.manager, value, "unparsed date range");
                    }
                    record.start_date = start;
                    record.end_date = end;
                }
                Some(Target::Field(column)) => {
                    raw.insert(column, value.to_string());
                }
                None => {}
            }
        }

        apply_raw_fields(&mut record, &raw);
        records.push(record);
    }

    info!(records = records.len(), "pivoted wide table");
    records
}

fn apply_raw_fields(record: &mut PromoRecord, raw: &HashMap<Column, String>) {
    for (&column, value) in raw {
        match column.class() {
            FieldClass::Text => record.set_text(column, clean_text(value)),
            FieldClass::Number => {
                let cleaned = clean_number(value);
                warn_if_dropped(&record.manager, column, value, cleaned.is_none());
                match column {
                    Column::SalesUah => record.sales_uah = cleaned,
                    Column::SalesUnits => record.sales_units = cleaned,
                    _ => {}
                }
            }
            FieldClass::Percent => {
                let cleaned = clean_percentage(value);
                warn_if_dropped(&record.manager, column, value, cleaned.is_none());
                match column {
                    Column::MarginPct => record.margin_pct = cleaned,
                    Column::DiscountPct => record.discount_pct = cleaned,
                    _ => {}
                }
            }
            FieldClass::Date => {}
        }
    }
}

fn warn_if_dropped(manager: &str, column: Column, value: &str, dropped: bool) {
    let text = normalise_whitespace(value);
    if dropped && !text.is_empty() && text != "-" {
        warn!(manager, column = column.header(), value = %text, "value not numeric; left empty");
    }
}

/// Drop records with no product. Returns how many were removed.
pub fn retain_with_product(records: &mut Vec<PromoRecord>) -> usize {
    let before = records.len();
    records.retain(|r| {
        let keep = r.product.is_some();
        if !keep {
            debug!(manager = %r.manager, "dropping record without product");
        }
        keep
    });
    before - records.len()
}
