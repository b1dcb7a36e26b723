mod errors;
mod trade_storage;

use async_trait::async_trait;

use crate::models::TradeRecord;
use crate::types::TradeId;

pub use errors::StorageError;
pub use trade_storage::TradeStorage;

/// Record-creation collaborator that receives each accepted import row.
#[async_trait]
pub trait TradeCreator: Send + Sync + 'static {
    async fn create(&self, trade: &TradeRecord) -> Result<TradeId, StorageError>;
}
