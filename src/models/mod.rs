mod trade;

pub use trade::{StoredTrade, TradeRecord};
