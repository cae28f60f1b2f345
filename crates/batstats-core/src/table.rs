// Delimited table loading and raw row access.
//
// Rows are kept as raw strings; numeric columns are parsed only when an
// operation reads them, so a malformed value fails at the point of use.

use crate::config::FieldMap;
use crate::error::{StatsError, StatsResult};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One table row: column name to raw cell text.
pub type Row = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path}: row {row} has no key column '{key}'")]
    MissingKey {
        path: String,
        key: String,
        row: usize,
    },
}

// ---------------------------------------------------------------------------
// Reader-based loaders
// ---------------------------------------------------------------------------

fn reader_builder(separator: u8, quote: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(separator)
        .quote(quote)
        .flexible(true);
    builder
}

/// Read every record of a headed table into row maps, in file order.
///
/// Short records simply lack the trailing columns; extra cells beyond the
/// header are dropped. Duplicate header names keep the rightmost cell.
pub fn read_rows_from_reader<R: Read>(
    rdr: R,
    separator: u8,
    quote: u8,
) -> Result<Vec<Row>, csv::Error> {
    let mut reader = reader_builder(separator, quote).from_reader(rdr);
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Index rows by the value of `key`. Later rows replace earlier ones that
/// share a key. `origin` names the table in error messages.
pub fn index_rows(
    rows: Vec<Row>,
    key: &str,
    origin: &str,
) -> Result<HashMap<String, Row>, TableError> {
    let mut table = HashMap::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let Some(value) = row.get(key).cloned() else {
            return Err(TableError::MissingKey {
                path: origin.to_string(),
                key: key.to_string(),
                row: idx + 1,
            });
        };
        table.insert(value, row);
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load a delimited file as an ordered list of rows.
pub fn read_rows(path: &Path, separator: u8, quote: u8) -> Result<Vec<Row>, TableError> {
    let file = std::fs::File::open(path).map_err(|e| TableError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let rows = read_rows_from_reader(file, separator, quote).map_err(|e| TableError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Table sources
// ---------------------------------------------------------------------------

/// Anything that can hand the pipeline a table of rows.
pub trait TableSource {
    /// All rows, in source order.
    fn rows(&self) -> Result<Vec<Row>, TableError>;

    /// Short description used in error messages.
    fn origin(&self) -> String;

    /// Rows keyed by the value of `key`; last occurrence wins.
    fn keyed_by(&self, key: &str) -> Result<HashMap<String, Row>, TableError> {
        index_rows(self.rows()?, key, &self.origin())
    }
}

/// A delimited file on disk. Every call re-reads the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub path: PathBuf,
    pub separator: u8,
    pub quote: u8,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>, separator: u8, quote: u8) -> Self {
        CsvTable {
            path: path.into(),
            separator,
            quote,
        }
    }

    /// The batting table named by the field map.
    pub fn batting(info: &FieldMap) -> StatsResult<Self> {
        Ok(Self::new(info.batting_file()?, info.separator, info.quote))
    }

    /// The master (player names) table named by the field map.
    pub fn master(info: &FieldMap) -> StatsResult<Self> {
        Ok(Self::new(info.master_file()?, info.separator, info.quote))
    }
}

impl TableSource for CsvTable {
    fn rows(&self) -> Result<Vec<Row>, TableError> {
        read_rows(&self.path, self.separator, self.quote)
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }
}

impl TableSource for Vec<Row> {
    fn rows(&self) -> Result<Vec<Row>, TableError> {
        Ok(self.clone())
    }

    fn origin(&self) -> String {
        "<memory>".to_string()
    }
}

// ---------------------------------------------------------------------------
// Cell access
// ---------------------------------------------------------------------------

/// Raw text of `column`, or a lookup error if the row lacks it.
pub fn cell<'a>(row: &'a Row, column: &str) -> StatsResult<&'a str> {
    row.get(column)
        .map(String::as_str)
        .ok_or_else(|| StatsError::MissingColumn {
            column: column.to_string(),
        })
}

/// Parse `column` as a float. Surrounding whitespace is ignored.
pub fn parse_float(row: &Row, column: &str) -> StatsResult<f64> {
    let raw = cell(row, column)?;
    raw.trim().parse::<f64>().map_err(|e| StatsError::Parse {
        column: column.to_string(),
        raw: raw.to_string(),
        message: e.to_string(),
    })
}

/// Parse `column` as an integer. Surrounding whitespace is ignored.
pub fn parse_int(row: &Row, column: &str) -> StatsResult<i64> {
    let raw = cell(row, column)?;
    raw.trim().parse::<i64>().map_err(|e| StatsError::Parse {
        column: column.to_string(),
        raw: raw.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
