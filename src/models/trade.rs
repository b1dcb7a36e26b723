use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::types::{Direction, Session, TradeField, TradeId};

/// A fully coerced trade, ready to be handed to a `TradeCreator`.
///
/// Optional fields are omitted from the serialized form when absent, and
/// timestamps are written as ISO-8601 UTC with millisecond precision
/// (`2024-03-01T10:00:00.000Z`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    /// Upper-case instrument name made only of letters, e.g. `EURUSD`.
    pub symbol: String,
    pub direction: Direction,
    #[serde(serialize_with = "serialize_timestamp")]
    pub entry_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_timestamp")]
    pub exit_time: Option<DateTime<Utc>>,
    pub entry_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    pub total_lots: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_initial: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_initial: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_pnl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_multiple_actual: Option<f64>,
    /// Either taken from the file or detected from `entry_time`.
    pub session: Session,
    /// True when the row carried neither an exit time nor an exit price.
    pub is_open: bool
}

impl TradeRecord {
    /// Returns the first numeric field holding an infinite or NaN value.
    ///
    /// Oversized digit strings in the source file parse to infinity, which no
    /// numeric column can store.
    pub fn non_finite_field(&self) -> Option<TradeField> {
        let numeric = [
            (TradeField::EntryPrice, Some(self.entry_price)),
            (TradeField::TotalLots, Some(self.total_lots)),
            (TradeField::ExitPrice, self.exit_price),
            (TradeField::SlInitial, self.sl_initial),
            (TradeField::TpInitial, self.tp_initial),
            (TradeField::NetPnl, self.net_pnl),
            (TradeField::RMultipleActual, self.r_multiple_actual)
        ];

        numeric.into_iter()
            .find(|(_, value)| value.is_some_and(|value| !value.is_finite()))
            .map(|(field, _)| field)
    }
}

/// A trade as persisted by storage, tagged with the identifier it was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredTrade {
    pub id: TradeId,
    #[serde(flatten)]
    pub trade: TradeRecord
}

fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn serialize_optional_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize_timestamp(value, serializer),
        None => serializer.serialize_none()
    }
}
