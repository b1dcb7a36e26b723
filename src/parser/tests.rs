use super::{parse_file, ParseError};
use anyhow::Result;

#[test]
fn test_parser_splits_headers_and_rows() -> Result<()> {
    let parsed = parse_file("Pair,Type,Lots\nEURUSD,buy,0.50\ngbpusd,sell,1.00\n")?;

    assert_eq!(parsed.headers, vec!["Pair", "Type", "Lots"]);
    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[0].get("Pair"), Some("EURUSD"));
    assert_eq!(parsed.rows[1].get("Type"), Some("sell"));
    assert_eq!(parsed.rows[1].get("Lots"), Some("1.00"));
    assert_eq!(parsed.rows[1].row_number, 2);

    Ok(())
}

#[test]
fn test_parser_discards_blank_lines_and_trims_cells() -> Result<()> {
    let parsed = parse_file("\n  \nPair , Lots\r\n\r\n  EURUSD ,  0.5 \r\n   \n")?;

    assert_eq!(parsed.headers, vec!["Pair", "Lots"]);
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].get("Pair"), Some("EURUSD"));
    assert_eq!(parsed.rows[0].get("Lots"), Some("0.5"));

    Ok(())
}

#[test]
fn test_parser_keeps_stray_carriage_return_inside_its_line() -> Result<()> {
    let parsed = parse_file("Pair,Type,Date\nEURUSD,buy,2024-01-01\rGBPUSD,sell,2024-01-02\nUSDJPY,buy,2024-01-03\r\n")?;

    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[0].get("Pair"), Some("EURUSD"));
    assert_eq!(parsed.rows[0].get("Date"), Some("2024-01-01\rGBPUSD"));
    assert_eq!(parsed.rows[1].row_number, 2);
    assert_eq!(parsed.rows[1].get("Pair"), Some("USDJPY"));
    assert_eq!(parsed.rows[1].get("Date"), Some("2024-01-03"));

    Ok(())
}

#[test]
fn test_parser_strips_quotes_without_honouring_quoted_commas() -> Result<()> {
    let parsed = parse_file("\"Pair\",\"Profit\",Notes\n\"EURUSD\",\"1,000\",x\n")?;

    assert_eq!(parsed.headers, vec!["Pair", "Profit", "Notes"]);
    assert_eq!(parsed.rows[0].get("Pair"), Some("EURUSD"));
    // The quoted comma splits the cell, shifting the remainder one column right.
    assert_eq!(parsed.rows[0].get("Profit"), Some("1"));
    assert_eq!(parsed.rows[0].get("Notes"), Some("000"));

    Ok(())
}

#[test]
fn test_parser_defaults_missing_trailing_cells_to_empty() -> Result<()> {
    let parsed = parse_file("Pair,Type,Lots\nEURUSD\nGBPUSD,sell,1,extra\n")?;

    assert_eq!(parsed.rows[0].get("Pair"), Some("EURUSD"));
    assert_eq!(parsed.rows[0].get("Type"), Some(""));
    assert_eq!(parsed.rows[0].get("Lots"), Some(""));
    assert_eq!(parsed.rows[1].get("Lots"), Some("1"));
    assert_eq!(parsed.rows[1].get("extra"), None);

    Ok(())
}

#[test]
fn test_parser_strips_byte_order_mark_from_first_header() -> Result<()> {
    let parsed = parse_file("\u{feff}Pair,Type\nEURUSD,buy\n")?;

    assert_eq!(parsed.headers[0], "Pair");

    Ok(())
}

#[test]
fn test_parser_rejects_files_without_data_rows() {
    assert!(matches!(parse_file(""), Err(ParseError::NotEnoughLines)));
    assert!(matches!(parse_file("\n\n   \n"), Err(ParseError::NotEnoughLines)));
    assert!(matches!(parse_file("Pair,Type\n\n"), Err(ParseError::NotEnoughLines)));
}
