pub mod labels;
pub mod types;

pub use labels::{LabelMap, Target, DATE_RANGE_LABEL};
pub use types::{Column, FieldClass};
