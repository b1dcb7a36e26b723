use thiserror::Error;

use crate::types::{TradeField, TradeId};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Trade for [{symbol}] has a non-finite value in [{field}]")]
    NonFiniteValue {
        symbol: String,
        field: TradeField
    },
    #[error("Trade for [{symbol}] entered at [{entry_time}] duplicates stored trade [{existing_id}]")]
    Duplicate {
        symbol: String,
        entry_time: String,
        existing_id: TradeId
    }
}
