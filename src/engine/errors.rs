use thiserror::Error;

use crate::engine::ImportStage;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import error: {0}")]
    Parse(#[from] ParseError),
    #[error("Import error: could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Import error: cannot {operation} during the [{actual}] stage, expected [{expected}]")]
    InvalidStage {
        operation: &'static str,
        expected: ImportStage,
        actual: ImportStage
    },
    #[error("Import error: file has no column named [{0}]")]
    UnknownColumn(String)
}
