// src/pipeline.rs

use anyhow::{bail, Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;

use crate::{
    process::{self, pivot},
    schema::{Column, LabelMap},
    xlsx,
};

pub const DEFAULT_INPUT: &str = "Data.csv";
pub const DEFAULT_OUTPUT: &str = "akcii_clean.xlsx";
pub const DEFAULT_SHEET_NAME: &str = "Акції";

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
    pub sheet_name: String,
    pub labels: LabelMap,
    /// Also dump the cleaned records here as JSON.
    pub json_output: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: b';',
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            labels: LabelMap::default(),
            json_output: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub managers: usize,
    pub written: usize,
    pub dropped: usize,
    pub output: PathBuf,
}

/// Field delimiter from a command-line string; must be exactly one byte.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [b] => Ok(*b),
        _ => bail!("delimiter must be a single byte, got {:?}", raw),
    }
}

/// load → pivot → filter → write.
pub fn run(cfg: &PipelineConfig) -> Result<RunSummary> {
    let start = Instant::now();

    let table = process::load_wide_csv(&cfg.input, cfg.delimiter)?;
    let mut records = pivot::build_records(&table, &cfg.labels);
    let managers = records.len();
    let dropped = pivot::retain_with_product(&mut records);
    info!(managers, kept = records.len(), dropped, "filtered records");

    xlsx::write_xlsx(&cfg.output, &cfg.sheet_name, &Column::ALL, &records)?;
    if let Some(json_path) = &cfg.json_output {
        write_json(json_path, &records)?;
    }

    info!(elapsed = ?start.elapsed(), "pipeline complete");
    Ok(RunSummary {
        managers,
        written: records.len(),
        dropped,
        output: cfg.output.clone(),
    })
}

/// Pretty-printed JSON array with a trailing newline.
pub fn write_json<P: AsRef<Path>>(path: P, records: &[pivot::PromoRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, records).context("serializing records")?;
    out.write_all(b"\n")?;
    out.flush()?;
    info!(path = %path.display(), records = records.len(), "json written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::tempdir;

    const SAMPLE: &str = "\u{feff}Показник;Іваненко;Петренко;;Коваль\n\
Коментар;a;b;c;d\n\
Відсоток акційної знижки, %;10%;5,5%;;\n\
Продукція;Сир;Масло;;\n\
Мережа;АТБ;Сільпо;Novus;\n\
Дата акції від дати завантаження до дати закінчення, план;01.03-15.03.24;28.12.23 - 07.01.24;;\n\
Продажі в еталоний період, грн;1 234,50;2 000;;\n\
Продажі в еталоний період, шт;120;-;;\n\
Маржа акційний період, %;25%;;;\n\
Еталонний місяць;Лютий;Листопад;;\n\
Акційний місяць;Березень;Грудень;;\n";

    fn read_rows(path: &Path) -> Result<Vec<Vec<Data>>> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let range = workbook.worksheet_range(DEFAULT_SHEET_NAME)?;
        Ok(range.rows().map(|r| r.to_vec()).collect())
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_run_end_to_end() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("Data.csv");
        fs::write(&input, SAMPLE)?;

        let cfg = PipelineConfig {
            input,
            output: dir.path().join("akcii_clean.xlsx"),
            json_output: Some(dir.path().join("akcii_clean.json")),
            ..Default::default()
        };
        let summary = run(&cfg)?;

        assert_eq!(summary.managers, 4);
        assert_eq!(summary.written, 2);
        assert_eq!(summary.dropped, 2);

        let rows = read_rows(&cfg.output)?;
        // header row plus the two records with a product
        assert_eq!(rows.len(), 3);

        // header in fixed order, regardless of input row order
        let header: Vec<Data> = Column::ALL.iter().map(|c| text(c.header())).collect();
        assert_eq!(rows[0], header);

        assert_eq!(
            rows[1],
            vec![
                text("Іваненко"),
                text("2024-03-01"),
                text("2024-03-15"),
                text("АТБ"),
                text("Сир"),
                text("Лютий"),
                text("Березень"),
                Data::Float(1234.5),
                Data::Float(120.0),
                Data::Float(25.0),
                Data::Float(10.0),
            ]
        );

        assert_eq!(rows[2][0], text("Петренко"));
        assert_eq!(rows[2][1], text("2023-12-28"));
        assert_eq!(rows[2][2], text("2024-01-07"));
        assert_eq!(rows[2][7], Data::Float(2000.0));
        assert_eq!(rows[2][8], Data::Empty);
        assert_eq!(rows[2][9], Data::Empty);
        assert_eq!(rows[2][10], Data::Float(5.5));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("akcii_clean.json"))?)?;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Продукт"], "Сир");
        assert_eq!(records[0]["Маржа %"], 25.0);
        assert_eq!(records[1]["Продажі шт"], serde_json::Value::Null);
        Ok(())
    }

    #[test]
    fn test_run_with_label_overrides() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("export.csv");
        fs::write(&input, "label,A\nТовар,Кава\nПеріод,1.2.2025\n")?;
        let labels = LabelMap::from_yaml_str(
            "date_range: \"Період\"\nfields:\n  \"Товар\": \"Продукт\"\n",
        )?;

        let cfg = PipelineConfig {
            input,
            output: dir.path().join("out.xlsx"),
            delimiter: b',',
            labels,
            ..Default::default()
        };
        let summary = run(&cfg)?;
        assert_eq!(summary.written, 1);

        let rows = read_rows(&cfg.output)?;
        assert_eq!(rows[1][4], text("Кава"));
        assert_eq!(rows[1][1], text("2025-02-01"));
        assert_eq!(rows[1][2], text("2025-02-01"));
        Ok(())
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        // one char, but two bytes in UTF-8
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        let cfg = PipelineConfig {
            input: dir.path().join("nope.csv"),
            output: dir.path().join("out.xlsx"),
            ..Default::default()
        };
        assert!(run(&cfg).is_err());
        assert!(!cfg.output.exists());
    }
}
