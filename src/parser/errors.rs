use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("File must have a header and at least one data row")]
    NotEnoughLines,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error)
}
