//! Read the first worksheet of a statement export into a text [`Grid`].
//!
//! Every cell becomes text here so the transformer never sees numbers or
//! dates that a writer could re-interpret.

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use reledger_core::Grid;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::SourceFormat;

/// Source could not be opened; the file is skipped.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("unsupported file type: {path}")]
    Unsupported { path: PathBuf },

    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook has no sheets: {path}")]
    NoSheet { path: PathBuf },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Load the first sheet of `path`, picking the reader by extension.
pub fn load_first_sheet(path: &Path) -> Result<Grid, OpenError> {
    if !path.is_file() {
        return Err(OpenError::NotFound {
            path: path.to_path_buf(),
        });
    }
    match SourceFormat::from_path(path) {
        Some(SourceFormat::Csv) => load_csv(path),
        Some(SourceFormat::Xlsx | SourceFormat::Xls | SourceFormat::Ods) => load_workbook(path),
        None => Err(OpenError::Unsupported {
            path: path.to_path_buf(),
        }),
    }
}

fn load_workbook(path: &Path) -> Result<Grid, OpenError> {
    let workbook_err = |source| OpenError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OpenError::NoSheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_err)?;

    // Keep absolute coordinates: the header window is expressed in sheet rows.
    let Some((start_row, start_col)) = range.start() else {
        return Ok(Grid::default());
    };
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    Ok(Grid::new(rows))
}

fn load_csv(path: &Path) -> Result<Grid, OpenError> {
    let csv_err = |source| OpenError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        // Empty lines produce no record; pad so row numbers stay file line numbers.
        let line = record
            .position()
            .map_or(rows.len() + 1, |p| p.line() as usize);
        if line > rows.len() + 1 {
            rows.resize_with(line - 1, Vec::new);
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Grid::new(rows))
}

/// Text rendering of one spreadsheet cell.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt: NaiveDateTime| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| cell.to_string()),
    }
}
