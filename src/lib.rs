pub mod pipeline;
pub mod process;
pub mod schema;
pub mod xlsx;

pub use pipeline::{run, PipelineConfig, RunSummary};
