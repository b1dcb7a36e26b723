use super::errors::FieldError;
use super::{Direction, Session, TradeField};
use anyhow::Result;
use std::str::FromStr;

#[test]
fn test_trade_field_parses_snake_case_names() -> Result<()> {
    let test_cases = vec![
        ("symbol", TradeField::Symbol),
        ("entry_time", TradeField::EntryTime),
        ("  EXIT_PRICE ", TradeField::ExitPrice),
        ("r_multiple_actual", TradeField::RMultipleActual),
        ("skip", TradeField::Skip),
    ];

    for (input_string, expected_field) in test_cases {
        assert_eq!(TradeField::from_str(input_string)?, expected_field);
    }

    Ok(())
}

#[test]
fn test_trade_field_display_round_trips_every_variant() -> Result<()> {
    for field in TradeField::ALL {
        assert_eq!(TradeField::from_str(&field.to_string())?, field);
    }

    Ok(())
}

#[test]
fn test_trade_field_rejects_unknown_names() {
    let result = TradeField::from_str("entry price");

    assert!(matches!(result, Err(FieldError::UnknownField(name)) if name == "entry price"));
}

#[test]
fn test_enums_serialize_to_their_wire_names() -> Result<()> {
    assert_eq!(serde_json::to_string(&Direction::Buy)?, "\"buy\"");
    assert_eq!(serde_json::to_string(&Session::NewYorkAm)?, "\"new_york_am\"");
    assert_eq!(serde_json::to_string(&Session::OffHours)?, "\"off_hours\"");
    assert_eq!(serde_json::to_string(&TradeField::TotalLots)?, "\"total_lots\"");
    assert_eq!(Session::NewYorkPm.to_string(), "new_york_pm");

    Ok(())
}
