use crate::models::{StoredTrade, TradeRecord};
use crate::storage::{StorageError, TradeCreator};
use crate::types::TradeId;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory trade store standing in for the journal backend.
///
/// Identifiers are handed out sequentially from 1. A trade whose symbol,
/// direction, entry time and entry price match an already stored trade is
/// rejected, so importing the same file twice does not double the journal.
#[derive(Default)]
pub struct TradeStorage {
    trades: DashMap<TradeId, TradeRecord>,
    fingerprints: DashMap<String, TradeId>,
    last_id: AtomicU64
}

impl TradeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Returns every stored trade ordered by identifier, i.e. creation order.
    pub fn trades(&self) -> Vec<StoredTrade> {
        let mut trades: Vec<StoredTrade> = self.trades.iter()
            .map(|item| StoredTrade { id: *item.key(), trade: item.value().clone() })
            .collect();

        trades.sort_by_key(|stored| stored.id);
        trades
    }
}

fn fingerprint(trade: &TradeRecord) -> String {
    format!("{}|{}|{}|{}", trade.symbol, trade.direction, trade.entry_time.timestamp_millis(), trade.entry_price)
}

#[async_trait]
impl TradeCreator for TradeStorage {
    async fn create(&self, trade: &TradeRecord) -> Result<TradeId, StorageError> {
        if let Some(field) = trade.non_finite_field() {
            return Err(StorageError::NonFiniteValue { symbol: trade.symbol.clone(), field });
        }

        match self.fingerprints.entry(fingerprint(trade)) {
            Entry::Occupied(entry) => Err(StorageError::Duplicate {
                symbol: trade.symbol.clone(),
                entry_time: trade.entry_time.to_rfc3339(),
                existing_id: *entry.get()
            }),
            Entry::Vacant(entry) => {
                let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
                entry.insert(id);
                self.trades.insert(id, trade.clone());

                Ok(id)
            }
        }
    }
}
