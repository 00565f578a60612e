use serde::Serialize;
use std::fmt;

use super::utils::normalise_whitespace;

/// A typed cell ready for the workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Decimal(x) => write!(f, "{}", x),
        }
    }
}

/// `"1 234,50"` → `Decimal(1234.5)`, `"12,0"` → `Integer(12)`.
///
/// Space thousands separators are dropped and a decimal comma becomes a
/// point. Empty, `-`, unparseable and non-finite input yields `None`.
pub fn clean_number(raw: &str) -> Option<CellValue> {
    let text = normalise_whitespace(raw);
    if text.is_empty() {
        return None;
    }
    let text = text.replace(' ', "").replace(',', ".");
    if text.is_empty() || text == "-" {
        return None;
    }

    let number: f64 = text.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if number.fract() == 0.0 && number >= i64::MIN as f64 && number < i64::MAX as f64 {
        Some(CellValue::Integer(number as i64))
    } else {
        Some(CellValue::Decimal(number))
    }
}

/// `"12,5 %"` → `12.5`. Always a decimal, never an integer.
pub fn clean_percentage(raw: &str) -> Option<f64> {
    let text = normalise_whitespace(raw).replace('%', "");
    match clean_number(&text)? {
        CellValue::Integer(i) => Some(i as f64),
        CellValue::Decimal(x) => Some(x),
        CellValue::Text(_) => None,
    }
}
