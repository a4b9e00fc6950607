//! Read-only view over the first worksheet of a statement export.
//!
//! Coordinates are 1-based to match spreadsheet row/column numbering.

/// Anything the header locator and row transformer can read cells from.
pub trait SheetSource {
    /// Index of the last used row (1-based, absolute).
    fn used_rows(&self) -> usize;

    /// Index of the last used column (1-based, absolute).
    fn used_cols(&self) -> usize;

    /// Text of the cell at `(row, col)`; empty outside the used range.
    fn cell(&self, row: usize, col: usize) -> &str;
}

/// Row-major in-memory sheet of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Convenience for tests and fixtures.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Set a single cell, growing the grid as needed. Row or column 0 is ignored.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if row == 0 || col == 0 {
            return;
        }
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let r = &mut self.rows[row - 1];
        if r.len() < col {
            r.resize(col, String::new());
        }
        r[col - 1] = value.into();
        self.width = self.width.max(col);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl SheetSource for Grid {
    fn used_rows(&self) -> usize {
        self.rows.len()
    }

    fn used_cols(&self) -> usize {
        self.width
    }

    fn cell(&self, row: usize, col: usize) -> &str {
        if row == 0 || col == 0 {
            return "";
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .map(String::as_str)
            .unwrap_or("")
    }
}
