mod errors;
mod file_parser;
#[cfg(test)]
mod tests;

pub use errors::ParseError;
pub use file_parser::{parse_file, RawRow};
