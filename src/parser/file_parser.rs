use crate::parser::errors::ParseError;
use crate::types::RowNumber;
use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use indexmap::IndexMap;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A single data line of the uploaded file, keyed by header name.
///
/// Cells are looked up by header, so duplicate headers collapse onto the last
/// cell carrying that name.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based position of the row among the data lines (the header is not counted).
    pub row_number: RowNumber,
    cells: IndexMap<String, String>
}

impl RawRow {
    pub fn new(row_number: RowNumber, cells: IndexMap<String, String>) -> Self {
        Self { row_number, cells }
    }

    /// Returns the cell under `column`, or `None` if the file has no such header.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>
}

/// Splits raw file text into a header line and data rows.
///
/// Blank lines are discarded before the header is chosen. Cells are split on
/// every comma with quoting disabled, so quoted fields containing commas are
/// NOT supported: `"1,000"` becomes two cells. Quote characters are then
/// stripped from each trimmed cell.
///
/// # Errors
/// Returns `ParseError::NotEnoughLines` unless there is a header line and at
/// least one data line.
pub fn parse_file(text: &str) -> Result<ParsedFile, ParseError> {
    let lines: Vec<&str> = text.trim_start_matches(BYTE_ORDER_MARK)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(ParseError::NotEnoughLines);
    }

    //NOTE: Records end at '\n' only, a stray '\r' inside a line stays part of its cell.
    let content = lines.join("\n");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let headers = match records.next() {
        Some(record) => clean_cells(&record?),
        None => return Err(ParseError::NotEnoughLines)
    };

    let mut rows = Vec::with_capacity(lines.len() - 1);

    for (index, record) in records.enumerate() {
        let cells = clean_cells(&record?);

        let cells = headers.iter()
            .enumerate()
            .map(|(position, header)| {
                (header.clone(), cells.get(position).cloned().unwrap_or_default())
            })
            .collect();

        rows.push(RawRow::new(index + 1, cells));
    }

    Ok(ParsedFile { headers, rows })
}

fn clean_cells(record: &StringRecord) -> Vec<String> {
    record.iter()
        .map(|cell| cell.trim().replace('"', ""))
        .collect()
}
