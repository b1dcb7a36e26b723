use chrono::{DateTime, Utc};

use crate::coercion::fields::{coerce_cell, CoercedValue};
use crate::coercion::session::detect_session;
use crate::mapping::ColumnMapping;
use crate::models::TradeRecord;
use crate::parser::RawRow;
use crate::types::{Direction, Session, TradeField};

const DEFAULT_ENTRY_PRICE: f64 = 0.0;
const DEFAULT_TOTAL_LOTS: f64 = 0.01;

/// Collects coerced cells for one row before the required fields are checked.
#[derive(Debug, Default)]
struct TradeDraft {
    symbol: Option<String>,
    direction: Option<Direction>,
    entry_time: Option<DateTime<Utc>>,
    exit_time: Option<DateTime<Utc>>,
    entry_price: Option<f64>,
    exit_price: Option<f64>,
    total_lots: Option<f64>,
    sl_initial: Option<f64>,
    tp_initial: Option<f64>,
    net_pnl: Option<f64>,
    r_multiple_actual: Option<f64>,
    session: Option<Session>
}

impl TradeDraft {
    fn apply(&mut self, field: TradeField, value: Option<CoercedValue>, now: DateTime<Utc>) {
        //NOTE: An unreadable entry time falls back to `now`, an unreadable exit time is simply left unset.
        let Some(value) = value else {
            if field == TradeField::EntryTime {
                self.entry_time = Some(now);
            }
            return;
        };

        match (field, value) {
            (TradeField::Symbol, CoercedValue::Text(symbol)) => self.symbol = Some(symbol),
            (TradeField::Direction, CoercedValue::Direction(direction)) => self.direction = Some(direction),
            (TradeField::EntryTime, CoercedValue::Timestamp(timestamp)) => self.entry_time = Some(timestamp),
            (TradeField::ExitTime, CoercedValue::Timestamp(timestamp)) => self.exit_time = Some(timestamp),
            (TradeField::EntryPrice, CoercedValue::Number(number)) => self.entry_price = Some(number),
            (TradeField::ExitPrice, CoercedValue::Number(number)) => self.exit_price = Some(number),
            (TradeField::TotalLots, CoercedValue::Number(number)) => self.total_lots = Some(number),
            (TradeField::SlInitial, CoercedValue::Number(number)) => self.sl_initial = Some(number),
            (TradeField::TpInitial, CoercedValue::Number(number)) => self.tp_initial = Some(number),
            (TradeField::NetPnl, CoercedValue::Number(number)) => self.net_pnl = Some(number),
            (TradeField::RMultipleActual, CoercedValue::Number(number)) => self.r_multiple_actual = Some(number),
            (TradeField::Session, CoercedValue::Session(session)) => self.session = Some(session),
            _ => {}
        }
    }

    fn finish(self) -> Option<TradeRecord> {
        let symbol = self.symbol.filter(|symbol| !symbol.is_empty())?;
        let direction = self.direction?;
        let entry_time = self.entry_time?;

        Some(TradeRecord {
            symbol,
            direction,
            entry_time,
            exit_time: self.exit_time,
            entry_price: self.entry_price.unwrap_or(DEFAULT_ENTRY_PRICE),
            exit_price: self.exit_price,
            total_lots: self.total_lots.unwrap_or(DEFAULT_TOTAL_LOTS),
            sl_initial: self.sl_initial,
            tp_initial: self.tp_initial,
            net_pnl: self.net_pnl,
            r_multiple_actual: self.r_multiple_actual,
            session: self.session.unwrap_or_else(|| detect_session(entry_time)),
            is_open: self.exit_time.is_none() && self.exit_price.is_none()
        })
    }
}

/// Coerces a raw row into a trade using the current column mappings.
///
/// Skipped columns and empty cells are ignored. Returns `None` when the row
/// ends up without a symbol (after stripping non-letters), a direction or an
/// entry time; such rows must never reach a `TradeCreator`.
pub fn coerce_row(row: &RawRow, mappings: &[ColumnMapping], now: DateTime<Utc>) -> Option<TradeRecord> {
    let mut draft = TradeDraft::default();

    for mapping in mappings.iter().filter(|mapping| mapping.target != TradeField::Skip) {
        let Some(cell) = row.get(&mapping.source_column).filter(|cell| !cell.is_empty()) else {
            continue;
        };

        draft.apply(mapping.target, coerce_cell(mapping.target, cell), now);
    }

    draft.finish()
}
