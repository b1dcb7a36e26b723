use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::coercion::session::parse_session;
use crate::types::{Direction, Session, TradeField};

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("leading number pattern is valid")
});

static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]+(?:\.[0-9]+)?").expect("number token pattern is valid")
});

const OFFSET_DATE_TIME_FORMATS: [&str; 2] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z"
];

const DATE_TIME_FORMATS: [&str; 20] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M"
];

const DATE_FORMATS: [&str; 6] = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%d %b %Y"];

const UTC_SUFFIX: &str = "UTC";

/// The typed value a single cell coerces into.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Text(String),
    Direction(Direction),
    Timestamp(DateTime<Utc>),
    Number(f64),
    Session(Session)
}

/// Coerces one non-empty cell for the given target field.
///
/// `None` means the cell could not be read as that field. What happens next
/// (default, fallback or leaving the field unset) is decided by the row draft.
pub fn coerce_cell(field: TradeField, cell: &str) -> Option<CoercedValue> {
    match field {
        TradeField::Symbol => Some(CoercedValue::Text(parse_symbol(cell))),
        TradeField::Direction => Some(CoercedValue::Direction(parse_direction(cell))),
        TradeField::EntryTime | TradeField::ExitTime => parse_timestamp(cell).map(CoercedValue::Timestamp),
        TradeField::EntryPrice
        | TradeField::ExitPrice
        | TradeField::TotalLots
        | TradeField::SlInitial
        | TradeField::TpInitial => parse_number(cell).map(CoercedValue::Number),
        TradeField::NetPnl | TradeField::RMultipleActual => extract_number(cell).map(CoercedValue::Number),
        TradeField::Session => parse_session(cell).map(CoercedValue::Session),
        TradeField::Skip => None
    }
}

/// Upper-cases the cell and keeps only ASCII letters (`eur/usd.m` -> `EURUSDM`).
pub fn parse_symbol(cell: &str) -> String {
    cell.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|character| character.to_ascii_uppercase())
        .collect()
}

/// Reads `buy`, `long` or `b` (any case) as a buy.
///
/// Every other value, including typos and the empty string, becomes a sell.
/// This closed-world default is kept on purpose; callers cannot tell an
/// explicit "sell" from an unrecognised value.
pub fn parse_direction(cell: &str) -> Direction {
    match cell.trim().to_lowercase().as_str() {
        "buy" | "long" | "b" => Direction::Buy,
        _ => Direction::Sell
    }
}

/// Parses RFC 3339, RFC 2822 and the common spreadsheet date layouts.
///
/// Offsets may be written with or without a colon (`+0200`). Values without an
/// offset, or ending in ` UTC`, are taken to be UTC; date-only values map to
/// midnight. 12-hour clocks need an AM/PM marker.
pub fn parse_timestamp(cell: &str) -> Option<DateTime<Utc>> {
    let cell = cell.trim();

    let with_offset = DateTime::parse_from_rfc3339(cell)
        .or_else(|_| DateTime::parse_from_rfc2822(cell))
        .ok()
        .or_else(|| {
            OFFSET_DATE_TIME_FORMATS.iter()
                .find_map(|format| DateTime::parse_from_str(cell, format).ok())
        });

    if let Some(timestamp) = with_offset {
        return Some(timestamp.with_timezone(&Utc));
    }

    let cell = cell.strip_suffix(UTC_SUFFIX).map_or(cell, str::trim_end);

    DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(cell, format).ok())
        .or_else(|| {
            DATE_FORMATS.iter()
                .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Drops everything but digits, `.` and `-`, then reads the longest numeric prefix.
///
/// `"$1,234.50"` reads as `1234.5`, `"1.2.3"` as `1.2`, and `"-"` as nothing.
pub fn parse_number(cell: &str) -> Option<f64> {
    let stripped: String = cell.chars()
        .filter(|character| character.is_ascii_digit() || *character == '.' || *character == '-')
        .collect();

    LEADING_NUMBER.find(&stripped)
        .and_then(|number| number.as_str().parse().ok())
}

/// Returns the first signed decimal token anywhere in the cell (`"+2.5R"` -> `2.5`).
pub fn extract_number(cell: &str) -> Option<f64> {
    NUMBER_TOKEN.find(cell)
        .and_then(|number| number.as_str().parse().ok())
}
