//! Legacy `.xls` statements are re-saved as `.xlsx` before transformation.

use reledger_core::SheetSource;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::engine::EngineSession;
use crate::load::OpenError;
use crate::xlsx::{text_format, write_text};

pub const CONVERTED_SUFFIX: &str = "_ConvertedFromXls";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Open(#[from] OpenError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}

/// `<dir>/<stem>_ConvertedFromXls.xlsx`
pub fn converted_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}{CONVERTED_SUFFIX}.xlsx"))
}

/// Copy the first sheet of a legacy workbook into a new `.xlsx`, all cells as text.
pub fn convert_legacy(session: &mut EngineSession, source: &Path) -> Result<PathBuf, ConvertError> {
    let doc = session.open(source)?;
    let target = converted_path(source);
    let write_err = |source| ConvertError::Write {
        path: target.clone(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let format = text_format();
    let sheet = doc.sheet();
    for row in 1..=sheet.used_rows() {
        for col in 1..=sheet.used_cols() {
            let value = sheet.cell(row, col);
            if !value.is_empty() {
                write_text(worksheet, row, col, value, &format).map_err(write_err)?;
            }
        }
    }
    workbook.save(&target).map_err(write_err)?;

    info!(from = %source.display(), to = %target.display(), "converted legacy workbook");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converted_path() {
        assert_eq!(
            converted_path(Path::new("/in/HDFC_CC_AB_mar.xls")),
            PathBuf::from("/in/HDFC_CC_AB_mar_ConvertedFromXls.xlsx")
        );
    }

    #[test]
    fn test_unreadable_legacy_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HDFC_CC_AB_mar.xls");
        std::fs::write(&path, "garbage").unwrap();

        let mut session = EngineSession::acquire("convert");
        let err = convert_legacy(&mut session, &path).unwrap_err();
        assert!(matches!(err, ConvertError::Open(OpenError::Workbook { .. })));
        assert!(!converted_path(&path).exists());
    }
}
