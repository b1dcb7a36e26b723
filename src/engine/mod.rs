mod errors;
mod import_engine;

pub use errors::ImportError;
pub use import_engine::{ImportEngine, ImportStage};
