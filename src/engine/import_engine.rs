use crate::coercion::coerce_row;
use crate::engine::ImportError;
use crate::mapping::{infer_mapping, ColumnMapping};
use crate::models::TradeRecord;
use crate::notifications::{Notification, Notifier};
use crate::parser::{parse_file, RawRow};
use crate::storage::TradeCreator;
use crate::types::{RowNumber, TradeField};
use chrono::Utc;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stages of an import. A finished import returns to `Upload`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ImportStage {
    Upload,
    Mapping,
    Preview,
    Importing
}

impl Display for ImportStage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStage::Upload => "upload",
            ImportStage::Mapping => "mapping",
            ImportStage::Preview => "preview",
            ImportStage::Importing => "importing"
        };

        formatter.write_str(name)
    }
}

/// Running counters reported after every processed row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ImportProgress {
    pub processed: usize,
    pub total: usize,
    pub imported: usize,
    pub failed: usize
}

impl ImportProgress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }

        ((self.processed as f64 / self.total as f64) * 100.0).round() as u8
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize
}

impl ImportSummary {
    fn notification(&self) -> Notification {
        let message = format!("{} trades imported, {} failed", self.imported, self.failed);

        match (self.imported, self.failed) {
            (_, 0) => Notification::success(message),
            (0, _) => Notification::error(message),
            _ => Notification::warning(message)
        }
    }
}

/// One row as it would be imported with the current mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub row_number: RowNumber,
    /// `None` when the row would be rejected.
    pub trade: Option<TradeRecord>
}

/// Drives a CSV import from file selection to record creation.
///
/// The engine walks `Upload -> Mapping -> Preview -> Importing -> Upload`.
/// Only a successful parse leaves `Upload`, and moving on from `Mapping` and
/// `Preview` always needs an explicit call. Rows are created strictly one at
/// a time so that progress can be reported after each of them.
pub struct ImportEngine<C: TradeCreator, N: Notifier> {
    creator: Arc<C>,
    notifier: Arc<N>,
    stage: ImportStage,
    headers: Vec<String>,
    rows: Vec<RawRow>,
    mappings: Vec<ColumnMapping>
}

impl<C: TradeCreator, N: Notifier> ImportEngine<C, N> {
    /// Creates a new engine waiting for a file.
    pub fn new(creator: Arc<C>, notifier: Arc<N>) -> Self {
        Self {
            creator,
            notifier,
            stage: ImportStage::Upload,
            headers: Vec::new(),
            rows: Vec::new(),
            mappings: Vec::new()
        }
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Reads the file at `path` and loads it, see [`ImportEngine::load`].
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), ImportError> {
        self.expect_stage("load a file", ImportStage::Upload)?;

        let path = path.as_ref();

        match tokio::fs::read_to_string(path).await {
            Ok(text) => self.load(&text),
            Err(error) => {
                self.clear();
                self.notifier.notify(Notification::error(format!("Could not read {}: {error}", path.display())));
                Err(ImportError::Io(error))
            }
        }
    }

    /// Parses uploaded text and infers the default column mapping.
    ///
    /// # Errors
    /// On a parse failure the engine stays in `Upload` with no parsed state,
    /// and an error notification is emitted.
    pub fn load(&mut self, text: &str) -> Result<(), ImportError> {
        self.expect_stage("load a file", ImportStage::Upload)?;

        let parsed = match parse_file(text) {
            Ok(parsed) => parsed,
            Err(error) => {
                self.clear();
                self.notifier.notify(Notification::error(error.to_string()));
                return Err(ImportError::Parse(error));
            }
        };

        self.mappings = infer_mapping(&parsed.headers);
        self.headers = parsed.headers;
        self.rows = parsed.rows;
        self.stage = ImportStage::Mapping;

        info!("Loaded {} rows with {} columns", self.rows.len(), self.headers.len());

        for mapping in &self.mappings {
            info!("Column [{}] inferred as [{}]", mapping.source_column, mapping.target);
        }

        Ok(())
    }

    /// Reassigns every column named `source_column` to `target`.
    pub fn set_mapping(&mut self, source_column: &str, target: TradeField) -> Result<(), ImportError> {
        self.expect_stage("change the mapping", ImportStage::Mapping)?;

        let mut matched = false;

        for mapping in self.mappings.iter_mut().filter(|mapping| mapping.source_column == source_column) {
            mapping.target = target;
            matched = true;
        }

        if !matched {
            return Err(ImportError::UnknownColumn(source_column.to_string()));
        }

        debug!("Column [{source_column}] mapped to [{target}]");

        Ok(())
    }

    pub fn continue_to_preview(&mut self) -> Result<(), ImportError> {
        self.expect_stage("continue to preview", ImportStage::Mapping)?;
        self.stage = ImportStage::Preview;

        Ok(())
    }

    /// Coerces the first `limit` rows with the current mapping without creating anything.
    pub fn preview(&self, limit: usize) -> Vec<PreviewRow> {
        let now = Utc::now();

        self.rows.iter()
            .take(limit)
            .map(|row| PreviewRow {
                row_number: row.row_number,
                trade: coerce_row(row, &self.mappings, now)
            })
            .collect()
    }

    /// Abandons the current file and returns to `Upload`.
    pub fn reset(&mut self) {
        self.clear();
    }

    /// Imports every row, calling `on_progress` after each one.
    ///
    /// Rejected rows and failed creation calls are counted and skipped; neither
    /// aborts the batch. Once all rows are processed a summary notification is
    /// emitted and the engine returns to `Upload` with no parsed state.
    pub async fn import<F>(&mut self, mut on_progress: F) -> Result<ImportSummary, ImportError>
    where
        F: FnMut(ImportProgress),
    {
        self.expect_stage("start the import", ImportStage::Preview)?;
        self.stage = ImportStage::Importing;

        let rows = std::mem::take(&mut self.rows);
        let mut progress = ImportProgress { processed: 0, total: rows.len(), imported: 0, failed: 0 };

        for row in &rows {
            match coerce_row(row, &self.mappings, Utc::now()) {
                None => {
                    progress.failed += 1;
                    warn!("Row [{}] rejected: symbol, direction or entry time is missing", row.row_number);
                }
                Some(trade) => match self.creator.create(&trade).await {
                    Ok(trade_id) => {
                        progress.imported += 1;
                        debug!("Row [{}] for [{}] created as trade [{trade_id}]", row.row_number, trade.symbol);
                    }
                    Err(error) => {
                        progress.failed += 1;
                        warn!("Row [{}] could not be created: {error}", row.row_number);
                    }
                }
            }

            progress.processed += 1;
            on_progress(progress);
        }

        let summary = ImportSummary { imported: progress.imported, failed: progress.failed };

        self.notifier.notify(summary.notification());
        self.clear();

        Ok(summary)
    }

    fn expect_stage(&self, operation: &'static str, expected: ImportStage) -> Result<(), ImportError> {
        if self.stage != expected {
            return Err(ImportError::InvalidStage { operation, expected, actual: self.stage });
        }

        Ok(())
    }

    fn clear(&mut self) {
        self.headers.clear();
        self.rows.clear();
        self.mappings.clear();
        self.stage = ImportStage::Upload;
    }
}
