use crate::types::errors::FieldError;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Canonical trade fields a source column can be mapped onto.
///
/// `Skip` is the sentinel for columns that are ignored during import.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeField {
    Symbol,
    Direction,
    EntryTime,
    ExitTime,
    EntryPrice,
    ExitPrice,
    TotalLots,
    SlInitial,
    TpInitial,
    NetPnl,
    RMultipleActual,
    Session,
    Skip
}

impl TradeField {
    pub const ALL: [TradeField; 13] = [
        TradeField::Symbol,
        TradeField::Direction,
        TradeField::EntryTime,
        TradeField::ExitTime,
        TradeField::EntryPrice,
        TradeField::ExitPrice,
        TradeField::TotalLots,
        TradeField::SlInitial,
        TradeField::TpInitial,
        TradeField::NetPnl,
        TradeField::RMultipleActual,
        TradeField::Session,
        TradeField::Skip
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeField::Symbol => "symbol",
            TradeField::Direction => "direction",
            TradeField::EntryTime => "entry_time",
            TradeField::ExitTime => "exit_time",
            TradeField::EntryPrice => "entry_price",
            TradeField::ExitPrice => "exit_price",
            TradeField::TotalLots => "total_lots",
            TradeField::SlInitial => "sl_initial",
            TradeField::TpInitial => "tp_initial",
            TradeField::NetPnl => "net_pnl",
            TradeField::RMultipleActual => "r_multiple_actual",
            TradeField::Session => "session",
            TradeField::Skip => "skip"
        }
    }
}

impl Display for TradeField {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TradeField {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_lowercase();

        TradeField::ALL.into_iter()
            .find(|field| field.as_str() == value)
            .ok_or(FieldError::UnknownField(value))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell
}

impl Display for Direction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => formatter.write_str("buy"),
            Direction::Sell => formatter.write_str("sell")
        }
    }
}

/// Named trading windows used to categorise entry times.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    Tokyo,
    London,
    NewYorkAm,
    NewYorkPm,
    OffHours
}

impl Display for Session {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Session::Tokyo => "tokyo",
            Session::London => "london",
            Session::NewYorkAm => "new_york_am",
            Session::NewYorkPm => "new_york_pm",
            Session::OffHours => "off_hours"
        };

        formatter.write_str(name)
    }
}
