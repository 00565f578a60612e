// src/schema/labels.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

use super::types::{Column, FieldClass};

/// Row label whose value is a `start-end` date range feeding both date columns.
pub const DATE_RANGE_LABEL: &str = "Дата акції від дати завантаження до дати закінчення, план";

static DEFAULT_FIELD_LABELS: &[(&str, Column)] = &[
    ("Мережа", Column::Network),
    ("Продукція", Column::Product),
    ("Еталонний місяць", Column::ReferenceMonth),
    ("Акційний місяць", Column::PromoMonth),
    ("Продажі в еталоний період, грн", Column::SalesUah),
    ("Продажі в еталоний період, шт", Column::SalesUnits),
    ("Маржа акційний період, %", Column::MarginPct),
    ("Відсоток акційної знижки, %", Column::DiscountPct),
];

/// What a labelled input row feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Field(Column),
    DateRange,
}

/// Lookup from input row label to output column.
#[derive(Debug, Clone)]
pub struct LabelMap {
    date_range: String,
    fields: HashMap<String, Column>,
}

/// On-disk shape of a label override file.
#[derive(Debug, Deserialize)]
struct LabelFile {
    date_range: Option<String>,
    #[serde(default)]
    fields: HashMap<String, String>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            date_range: DATE_RANGE_LABEL.to_string(),
            fields: DEFAULT_FIELD_LABELS
                .iter()
                .map(|(label, col)| (label.to_string(), *col))
                .collect(),
        }
    }
}

impl LabelMap {
    /// Resolve an already whitespace-normalised label.
    pub fn resolve(&self, label: &str) -> Option<Target> {
        if label == self.date_range {
            return Some(Target::DateRange);
        }
        self.fields.get(label).copied().map(Target::Field)
    }

    /// Load overrides from YAML and merge them over the defaults.
    ///
    /// ```yaml
    /// date_range: "Період акції"
    /// fields:
    ///   "Товар": "Продукт"
    /// ```
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading label map {:?}", path))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing label map {:?}", path))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: LabelFile = serde_yaml::from_str(text)?;
        let mut map = Self::default();

        if let Some(date_range) = file.date_range {
            let date_range = date_range.trim().to_string();
            if date_range.is_empty() {
                bail!("date_range label must not be empty");
            }
            map.date_range = date_range;
        }

        for (label, header) in file.fields {
            let column = match Column::from_header(header.trim()) {
                Some(c) => c,
                None => bail!("label `{}` targets unknown column `{}`", label, header),
            };
            if column == Column::Manager {
                bail!(
                    "label `{}` cannot target `{}`; managers come from the header row",
                    label,
                    header
                );
            }
            if column.class() == FieldClass::Date {
                bail!(
                    "label `{}` cannot target date column `{}`; use date_range",
                    label,
                    header
                );
            }
            debug!(label = %label, column = column.header(), "label override");
            map.fields.insert(label.trim().to_string(), column);
        }

        if map.fields.contains_key(&map.date_range) {
            bail!("label `{}` is both a field and the date range", map.date_range);
        }
        Ok(map)
    }
}
