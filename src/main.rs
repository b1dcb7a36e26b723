mod coercion;
mod engine;
mod mapping;
mod models;
mod notifications;
mod parser;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::ImportEngine;
use crate::notifications::ConsoleNotifier;
use crate::storage::TradeStorage;
use crate::types::TradeField;

const PREVIEW_ROWS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: trade-journal-importer [input].csv [log_level:optional] [Header=field ...] > [output].jsonl");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("Available fields: {}", TradeField::ALL.map(|field| field.as_str()).join(", "));
        eprintln!("Rows repeating the symbol, direction, entry time and entry price of an imported trade are counted as failed duplicates");
        exit(1);
    }

    let path = &args[1];
    let (log_level, overrides) = match args.get(2) {
        Some(level) if !level.contains('=') => (parse_log_level(level), &args[3..]),
        _ => (LevelFilter::ERROR, &args[2..])
    };

    setup_logging(log_level);

    let overrides = overrides.iter()
        .map(|value| parse_override(value))
        .collect::<Result<Vec<_>>>()?;

    let storage = Arc::new(TradeStorage::new());
    let mut engine = ImportEngine::new(storage.clone(), Arc::new(ConsoleNotifier));

    engine.load_file(path).await?;

    for (column, field) in overrides {
        if let Err(error) = engine.set_mapping(&column, field) {
            engine.reset();
            return Err(error.into());
        }
    }

    for mapping in engine.mappings() {
        debug!("Importing column [{}] as [{}]", mapping.source_column, mapping.target);
    }

    engine.continue_to_preview()?;

    debug!("Previewing {} of {} rows with columns: {}", PREVIEW_ROWS.min(engine.row_count()), engine.row_count(), engine.headers().join(", "));

    for row in engine.preview(PREVIEW_ROWS) {
        match row.trade {
            Some(trade) => debug!("Preview row [{}]: {:?}", row.row_number, trade),
            None => debug!("Preview row [{}]: rejected", row.row_number)
        }
    }

    let timer = Instant::now();
    let summary = engine.import(|progress| {
        debug!("Import progress: {}% ({}/{})", progress.percent(), progress.processed, progress.total);
    }).await?;
    let duration = timer.elapsed();

    info!("Imported {} and rejected {} trades in: {duration:?}", summary.imported, summary.failed);
    info!("Trade storage now holds {} trades, engine back at [{}]", storage.len(), engine.stage());

    write_results_to_stdout(&storage)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn parse_override(value: &str) -> Result<(String, TradeField)> {
    let (column, field) = value.rsplit_once('=')
        .ok_or_else(|| anyhow!("Mapping override '{value}' must look like Header=field"))?;

    Ok((column.trim().to_string(), TradeField::from_str(field)?))
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Created trades are written to stdout, so logging has to go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(storage: &TradeStorage) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    for stored in storage.trades() {
        serde_json::to_writer(&mut output, &stored)?;
        writeln!(output)?;
    }

    output.flush()?;

    Ok(())
}
