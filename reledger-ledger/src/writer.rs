//! Ledger writers. Every cell goes out as text so spreadsheet apps never turn
//! `01-03-2024` into a date serial or `0012` into `12`.
//!
//! Sinks buffer in memory and touch the filesystem only in [`LedgerSink::save`],
//! so an abandoned file leaves nothing behind.

use reledger_core::CanonicalRow;
use reledger_core::schema::CanonicalField;
use reledger_ingest::SourceFormat;
use reledger_ingest::xlsx::{text_format, write_text};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TRANSFORMED_SUFFIX: &str = "_Transformed";

/// A single output row could not be written.
#[derive(Debug, Error)]
#[error("cannot write output row {row}: {reason}")]
pub struct SinkError {
    pub row: usize,
    pub reason: String,
}

/// The output artifact could not be saved.
#[derive(Debug, Error)]
#[error("cannot save {path}: {reason}")]
pub struct SaveError {
    pub path: PathBuf,
    pub reason: String,
}

pub trait LedgerSink {
    /// Write the schema names as row 1.
    fn write_header(&mut self, schema: &[&str]) -> Result<(), SinkError>;

    /// Write one ledger row at 1-based output row `row`.
    fn write_row(&mut self, row: usize, values: &CanonicalRow) -> Result<(), SinkError>;

    /// Materialize the artifact and return where it landed.
    fn save(self: Box<Self>) -> Result<PathBuf, SaveError>;
}

/// `<dir>/<stem>_Transformed.<ext>` next to the source.
///
/// `.csv` sources keep `.csv`. Every spreadsheet source (`.xlsx`, `.xlsm`,
/// `.xls`, `.ods`) gets `.xlsx`, since [`XlsxSink`] only writes xlsx content:
/// `HDFC_CC_AB_mar.ods` becomes `HDFC_CC_AB_mar_Transformed.xlsx`.
pub fn output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = match SourceFormat::from_path(source) {
        Some(SourceFormat::Csv) => "csv",
        _ => "xlsx",
    };
    source.with_file_name(format!("{stem}{TRANSFORMED_SUFFIX}.{ext}"))
}

/// Pick the sink matching the source's format.
pub fn open_sink(source: &Path) -> Box<dyn LedgerSink> {
    let target = output_path(source);
    match SourceFormat::from_path(source) {
        Some(SourceFormat::Csv) => Box::new(CsvSink::new(target)),
        _ => Box::new(XlsxSink::new(target)),
    }
}

pub struct XlsxSink {
    path: PathBuf,
    worksheet: Worksheet,
    text: Format,
}

impl XlsxSink {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            worksheet: Worksheet::new(),
            text: text_format(),
        }
    }

    fn put(&mut self, row: usize, col: usize, value: &str) -> Result<(), SinkError> {
        write_text(&mut self.worksheet, row, col, value, &self.text).map_err(|e| SinkError {
            row,
            reason: e.to_string(),
        })
    }
}

impl LedgerSink for XlsxSink {
    fn write_header(&mut self, schema: &[&str]) -> Result<(), SinkError> {
        for (i, name) in schema.iter().enumerate() {
            self.put(1, i + 1, name)?;
        }
        Ok(())
    }

    fn write_row(&mut self, row: usize, values: &CanonicalRow) -> Result<(), SinkError> {
        // Date goes first so its cell is text-formatted before anything can
        // read it as a date.
        let date_col = CanonicalField::Date.index();
        self.put(row, date_col + 1, &values.values()[date_col])?;
        for (i, value) in values.values().iter().enumerate() {
            if i != date_col {
                self.put(row, i + 1, value)?;
            }
        }
        Ok(())
    }

    fn save(self: Box<Self>) -> Result<PathBuf, SaveError> {
        let XlsxSink { path, worksheet, .. } = *self;
        let mut workbook = Workbook::new();
        workbook.push_worksheet(worksheet);
        workbook.save(&path).map_err(|e| SaveError {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }
}

pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<Vec<u8>>,
}

impl CsvSink {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            writer: csv::Writer::from_writer(Vec::new()),
        }
    }
}

impl LedgerSink for CsvSink {
    fn write_header(&mut self, schema: &[&str]) -> Result<(), SinkError> {
        self.writer.write_record(schema).map_err(|e| SinkError {
            row: 1,
            reason: e.to_string(),
        })
    }

    fn write_row(&mut self, row: usize, values: &CanonicalRow) -> Result<(), SinkError> {
        self.writer.write_record(values.values()).map_err(|e| SinkError {
            row,
            reason: e.to_string(),
        })
    }

    fn save(self: Box<Self>) -> Result<PathBuf, SaveError> {
        let CsvSink { path, writer } = *self;
        let save_err = |reason: String| SaveError {
            path: path.clone(),
            reason,
        };
        let bytes = writer.into_inner().map_err(|e| save_err(e.to_string()))?;
        fs::write(&path, bytes).map_err(|e| save_err(e.to_string()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reledger_core::{CANONICAL_SCHEMA, Grid, HeaderWindow, Mop, TransformContext, locate_headers, transform_row};

    fn sample_row() -> CanonicalRow {
        let mut grid = Grid::default();
        for (col, label) in ["DATE", "Description", "AMT", "Debit / Credit"].iter().enumerate() {
            grid.set(27, col + 1, *label);
        }
        for (col, value) in ["01/03/2024", "POS, \"PURCHASE\"", "0012.50", "Dr"].iter().enumerate() {
            grid.set(28, col + 1, *value);
        }
        let ctx = TransformContext {
            mop: Mop::from_stem("HDFC_CC_AB").unwrap(),
            headers: locate_headers(&grid, HeaderWindow::default()).unwrap(),
        };
        transform_row(&grid, &ctx, 28)
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/in/HDFC_CC_AB_stmt.xlsx")),
            PathBuf::from("/in/HDFC_CC_AB_stmt_Transformed.xlsx")
        );
        assert_eq!(
            output_path(Path::new("HDFC_CC_AB_stmt.csv")),
            PathBuf::from("HDFC_CC_AB_stmt_Transformed.csv")
        );
        assert_eq!(
            output_path(Path::new("HDFC_CC_AB_stmt_ConvertedFromXls.xlsx")),
            PathBuf::from("HDFC_CC_AB_stmt_ConvertedFromXls_Transformed.xlsx")
        );
        assert_eq!(
            output_path(Path::new("/in/HDFC_CC_AB_stmt.xlsm")),
            PathBuf::from("/in/HDFC_CC_AB_stmt_Transformed.xlsx")
        );
        assert_eq!(
            output_path(Path::new("HDFC_CC_AB_stmt.ods")),
            PathBuf::from("HDFC_CC_AB_stmt_Transformed.xlsx")
        );
    }

    #[test]
    fn test_csv_sink_writes_on_save_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HDFC_CC_AB_stmt_Transformed.csv");
        let mut sink: Box<dyn LedgerSink> = Box::new(CsvSink::new(path.clone()));
        sink.write_header(&CANONICAL_SCHEMA).unwrap();
        sink.write_row(2, &sample_row()).unwrap();
        assert!(!path.exists());

        let saved = sink.save().unwrap();
        assert_eq!(saved, path);
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Narration,Item,Category,Place,Freq,For,MOP,Amt (Dr),Chq./Ref.No.,Value Dt,Amt (Cr)"
        );
        assert_eq!(
            lines.next().unwrap(),
            r#"01-03-2024,"POS, ""PURCHASE""",,,,,,HDFC_CC_AB,0012.50,,Dr,"#
        );
    }

    #[test]
    fn test_xlsx_sink_cells_are_text() {
        use calamine::{Data, Reader, Xlsx, open_workbook};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HDFC_CC_AB_stmt_Transformed.xlsx");
        let mut sink: Box<dyn LedgerSink> = Box::new(XlsxSink::new(path.clone()));
        sink.write_header(&CANONICAL_SCHEMA).unwrap();
        sink.write_row(2, &sample_row()).unwrap();
        sink.save().unwrap();

        let mut wb: Xlsx<_> = open_workbook(&path).unwrap();
        let range = wb.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Date".into())));
        assert_eq!(range.get_value((0, 11)), Some(&Data::String("Amt (Cr)".into())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("01-03-2024".into())));
        assert_eq!(range.get_value((1, 8)), Some(&Data::String("0012.50".into())));
        assert_eq!(range.get_value((1, 10)), Some(&Data::String("Dr".into())));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let sink: Box<dyn LedgerSink> =
            Box::new(CsvSink::new(PathBuf::from("/nonexistent/dir/out_Transformed.csv")));
        let err = sink.save().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dir/out_Transformed.csv"));
    }
}
