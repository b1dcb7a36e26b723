mod errors;
mod fields;
#[cfg(test)]
mod tests;

pub use fields::{Direction, Session, TradeField};

pub type TradeId = u64;
pub type RowNumber = usize;
