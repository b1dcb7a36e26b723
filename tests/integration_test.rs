use std::path::Path;
use std::process::{Command, Output};

use anyhow::{anyhow, Result};
use serde_json::Value;

fn run_importer(sample: &str, extra_args: &[&str]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_trade-journal-importer");
    let sample_path = Path::new("samples").join(sample);

    Ok(Command::new(binary_path)
        .arg(sample_path)
        .args(extra_args)
        .output()?)
}

fn parse_stdout(output: &Output) -> Result<Vec<Value>> {
    let stdout = String::from_utf8(output.stdout.clone())?;

    stdout.lines()
        .map(|line| serde_json::from_str(line).map_err(|error| anyhow!("invalid JSON line '{line}': {error}")))
        .collect()
}

#[test]
fn test_cli_imports_minimal_sample() -> Result<()> {
    let output = run_importer("trades.csv", &[])?;

    assert!(output.status.success());

    let trades = parse_stdout(&output)?;

    assert_eq!(trades.len(), 2);

    assert_eq!(trades[0]["id"], 1);
    assert_eq!(trades[0]["symbol"], "EURUSD");
    assert_eq!(trades[0]["direction"], "buy");
    assert_eq!(trades[0]["entry_time"], "2024-03-01T10:00:00.000Z");
    assert_eq!(trades[0]["entry_price"], 1.085);
    assert_eq!(trades[0]["total_lots"], 0.5);
    assert_eq!(trades[0]["is_open"], true);
    assert_eq!(trades[0]["session"], "off_hours");

    assert_eq!(trades[1]["symbol"], "GBPUSD");
    assert_eq!(trades[1]["direction"], "sell");
    assert_eq!(trades[1]["entry_price"], 1.26);
    assert_eq!(trades[1]["total_lots"], 1.0);

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("[success] 2 trades imported, 0 failed"));

    Ok(())
}

#[test]
fn test_cli_imports_journal_export_with_rejections_and_duplicates() -> Result<()> {
    let output = run_importer("journal_export.csv", &["warn"])?;

    assert!(output.status.success());

    let trades = parse_stdout(&output)?;
    let symbols: Vec<&str> = trades.iter().filter_map(|trade| trade["symbol"].as_str()).collect();

    assert_eq!(symbols, vec!["XAUUSD", "EURUSD", "USDJPY", "GBPUSD"]);

    let gold = &trades[0];

    assert_eq!(gold["direction"], "buy");
    assert_eq!(gold["exit_time"], "2024-01-15T15:10:00.000Z");
    assert_eq!(gold["exit_price"], 2038.9);
    assert_eq!(gold["sl_initial"], 2026.0);
    assert_eq!(gold["tp_initial"], 2042.0);
    assert_eq!(gold["net_pnl"], 150.0);
    assert_eq!(gold["r_multiple_actual"], 1.4);
    assert_eq!(gold["session"], "new_york_am");
    assert_eq!(gold["is_open"], false);

    let euro = &trades[1];

    assert_eq!(euro["direction"], "sell");
    assert_eq!(euro["session"], "london");
    assert_eq!(euro["is_open"], true);
    assert!(euro.get("exit_price").is_none());

    let yen = &trades[2];

    assert_eq!(yen["total_lots"], 0.01);
    assert_eq!(yen["net_pnl"], -35.5);
    assert_eq!(yen["r_multiple_actual"], -0.5);

    assert_eq!(trades[3]["session"], "new_york_am");

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("[warning] 4 trades imported, 2 failed"));

    Ok(())
}

#[test]
fn test_cli_applies_mapping_overrides() -> Result<()> {
    let output = run_importer("trades.csv", &["Lots=skip", "EntryPrice=tp_initial"])?;

    assert!(output.status.success());

    let trades = parse_stdout(&output)?;

    assert_eq!(trades[0]["total_lots"], 0.01);
    assert_eq!(trades[0]["entry_price"], 0.0);
    assert_eq!(trades[0]["tp_initial"], 1.085);

    Ok(())
}

#[test]
fn test_cli_rejects_unknown_override_fields() -> Result<()> {
    let output = run_importer("trades.csv", &["error", "Lots=quantity"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_usage_lists_fields_and_duplicate_rule() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_trade-journal-importer")).output()?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("Usage: trade-journal-importer"));
    assert!(stderr.contains("r_multiple_actual"));
    assert!(stderr.contains("counted as failed duplicates"));

    Ok(())
}

#[test]
fn test_cli_fails_on_file_without_data_rows() -> Result<()> {
    let output = run_importer("header_only.csv", &[])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("File must have a header and at least one data row"));

    Ok(())
}
