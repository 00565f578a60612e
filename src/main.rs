use anyhow::Result;
use clap::Parser;
use promo_pivot::{
    pipeline::{self, PipelineConfig},
    schema::LabelMap,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Pivot a wide promo-campaign export into a long-format workbook.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Wide CSV export, one column per manager
    #[arg(short, long, default_value = pipeline::DEFAULT_INPUT)]
    input: PathBuf,

    /// Workbook to write; replaced if it exists
    #[arg(short, long, default_value = pipeline::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Single-byte field delimiter
    #[arg(long, default_value = ";")]
    delimiter: String,

    /// Worksheet name: 1-31 characters, none of []:*?/\
    #[arg(long, default_value = pipeline::DEFAULT_SHEET_NAME)]
    sheet_name: String,

    /// YAML file overriding row labels
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Also write the cleaned records as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    let args = Args::parse();
    let delimiter = pipeline::parse_delimiter(&args.delimiter)?;
    let labels = match &args.labels {
        Some(path) => LabelMap::from_yaml_file(path)?,
        None => LabelMap::default(),
    };

    let cfg = PipelineConfig {
        input: args.input,
        output: args.output,
        delimiter,
        sheet_name: args.sheet_name,
        labels,
        json_output: args.json,
    };
    info!(input = %cfg.input.display(), output = %cfg.output.display(), "startup");

    let summary = pipeline::run(&cfg)?;
    let name = summary
        .output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| summary.output.display().to_string());
    println!("Cleaned data saved to {}", name);
    Ok(())
}
