//! Header discovery inside a bounded window of the statement sheet.
//!
//! HDFC card exports put a variable-height account summary above the
//! transaction table, so the header row moves between files. Each required
//! label is searched independently, row-major, and the first exact match wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::sheet::SheetSource;

/// Source columns the transformer reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceHeader {
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "Description")]
    Description,
    #[serde(rename = "AMT")]
    Amount,
    #[serde(rename = "Debit / Credit")]
    DebitCredit,
}

impl SourceHeader {
    pub const ALL: [SourceHeader; 4] = [
        SourceHeader::Date,
        SourceHeader::Description,
        SourceHeader::Amount,
        SourceHeader::DebitCredit,
    ];

    /// Exact cell text that marks this column (case-sensitive, untrimmed).
    pub fn label(&self) -> &'static str {
        match self {
            SourceHeader::Date => "DATE",
            SourceHeader::Description => "Description",
            SourceHeader::Amount => "AMT",
            SourceHeader::DebitCredit => "Debit / Credit",
        }
    }

    fn index(&self) -> usize {
        match self {
            SourceHeader::Date => 0,
            SourceHeader::Description => 1,
            SourceHeader::Amount => 2,
            SourceHeader::DebitCredit => 3,
        }
    }
}

impl fmt::Display for SourceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

/// Rows searched for headers. Columns always span the used width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderWindow {
    pub first_row: usize,
    pub last_row: usize,
}

impl Default for HeaderWindow {
    fn default() -> Self {
        Self {
            first_row: 27,
            last_row: 50,
        }
    }
}

impl HeaderWindow {
    /// Rows actually scanned on `sheet`: the window clipped to the used range.
    fn rows(&self, sheet: &dyn SheetSource) -> RangeInclusive<usize> {
        self.first_row.max(1)..=self.last_row.min(sheet.used_rows())
    }
}

/// Not every required label was found inside the window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required headers not found in rows {}-{}: {}", .window.first_row, .window.last_row, join_labels(.missing))]
pub struct MissingHeaderError {
    pub missing: Vec<SourceHeader>,
    pub window: HeaderWindow,
}

fn join_labels(headers: &[SourceHeader]) -> String {
    headers
        .iter()
        .map(|h| format!("'{}'", h.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Positions of every required header in one source file.
///
/// Only [`locate_headers`] builds this, so a value in hand is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderMap {
    positions: [CellPos; 4],
}

impl HeaderMap {
    pub fn position(&self, header: SourceHeader) -> CellPos {
        self.positions[header.index()]
    }

    pub fn column(&self, header: SourceHeader) -> usize {
        self.position(header).col
    }

    /// Data rows follow the `DATE` header through the last used row.
    pub fn data_rows(&self, used_rows: usize) -> RangeInclusive<usize> {
        self.position(SourceHeader::Date).row + 1..=used_rows
    }
}

/// First cell in `window` (row-major) whose text equals `label` exactly.
pub fn find_label(sheet: &dyn SheetSource, label: &str, window: HeaderWindow) -> Option<CellPos> {
    let cols = sheet.used_cols();
    window
        .rows(sheet)
        .flat_map(|row| (1..=cols).map(move |col| CellPos { row, col }))
        .find(|pos| sheet.cell(pos.row, pos.col) == label)
}

/// Locate all required headers, or report every label that is missing.
pub fn locate_headers(
    sheet: &dyn SheetSource,
    window: HeaderWindow,
) -> Result<HeaderMap, MissingHeaderError> {
    let (found, missing) = SourceHeader::ALL.iter().fold(
        ([None; 4], Vec::new()),
        |(mut found, mut missing), header| {
            match find_label(sheet, header.label(), window) {
                Some(pos) => {
                    tracing::debug!(header = header.label(), row = pos.row, col = pos.col, "header found");
                    found[header.index()] = Some(pos);
                }
                None => missing.push(*header),
            }
            (found, missing)
        },
    );

    match found {
        [Some(date), Some(desc), Some(amt), Some(dc)] if missing.is_empty() => Ok(HeaderMap {
            positions: [date, desc, amt, dc],
        }),
        _ => Err(MissingHeaderError { missing, window }),
    }
}
