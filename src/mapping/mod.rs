mod inference;

pub use inference::{infer_mapping, ColumnMapping};
