use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Unknown trade field: {0}")]
    UnknownField(String)
}
