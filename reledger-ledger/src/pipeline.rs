//! Per-file transformation and the sequential batch loop.
//!
//! Per file: derive the MOP, open the first sheet, locate headers, then
//! transform and write rows in source order and save. Failures at the MOP,
//! open, header and save steps skip the file; a failure while writing a row
//! aborts the batch.

use reledger_core::{
    CANONICAL_SCHEMA, HeaderWindow, MissingHeaderError, Mop, MopError, SheetSource, SourceHeader,
    TransformContext, locate_headers, transform_row,
};
use reledger_ingest::{ConvertError, EngineSession, OpenError, convert_legacy};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, trace, warn};

use crate::report::{BatchReport, FileOutcome, FileStatus};
use crate::writer::{SaveError, SinkError, open_sink};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub window: HeaderWindow,
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot derive MOP for {path}: {source}")]
    Mop {
        path: PathBuf,
        #[source]
        source: MopError,
    },

    #[error(transparent)]
    Open(#[from] OpenError),

    #[error("{path}: {source}")]
    MissingHeader {
        path: PathBuf,
        #[source]
        source: MissingHeaderError,
    },

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("{path}: {source}")]
    Row {
        path: PathBuf,
        #[source]
        source: SinkError,
    },
}

impl FileError {
    /// Whether the batch may move on to the next file.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FileError::Row { .. })
    }

    fn into_status(self) -> FileStatus {
        match self {
            FileError::Save(e) => FileStatus::SaveFailed {
                reason: e.to_string(),
            },
            other => FileStatus::Skipped {
                reason: other.to_string(),
            },
        }
    }
}

/// Transform one statement into its `_Transformed` ledger.
pub fn process_file(
    session: &mut EngineSession,
    path: &Path,
    options: &PipelineOptions,
) -> Result<FileOutcome, FileError> {
    let mop = Mop::from_path(path).map_err(|source| FileError::Mop {
        path: path.to_path_buf(),
        source,
    })?;

    let doc = session.open(path)?;
    let sheet = doc.sheet();

    let headers = locate_headers(sheet, options.window).map_err(|source| {
        warn!(file = %path.display(), missing = ?source.missing, "header missing");
        FileError::MissingHeader {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let header_row = headers.position(SourceHeader::Date).row;
    info!(file = %path.display(), header_row, "headers found");

    let ctx = TransformContext {
        mop: mop.clone(),
        headers,
    };
    let row_err = |source| FileError::Row {
        path: path.to_path_buf(),
        source,
    };

    let mut sink = open_sink(path);
    sink.write_header(&CANONICAL_SCHEMA).map_err(row_err)?;

    let mut rows = 0;
    for (out_row, src_row) in (2..).zip(headers.data_rows(sheet.used_rows())) {
        let row = transform_row(sheet, &ctx, src_row);
        sink.write_row(out_row, &row).map_err(row_err)?;
        trace!(source_row = src_row, output_row = out_row, "row processed");
        rows += 1;
    }

    let output = sink.save()?;
    info!(file = %path.display(), output = %output.display(), rows, "saved");

    Ok(FileOutcome::new(
        path,
        FileStatus::Transformed {
            output,
            mop,
            header_row,
            rows,
        },
    ))
}

/// Transform `paths` one after another under a single engine session.
///
/// Skipped and unsaved files are recorded in the report; a row-level write
/// failure is returned as the error and ends the batch.
pub fn run_batch(paths: &[PathBuf], options: &PipelineOptions) -> Result<BatchReport, FileError> {
    let mut session = EngineSession::acquire("transform");
    run_batch_in(&mut session, paths, options)
}

/// [`run_batch`] on a caller-held session.
pub fn run_batch_in(
    session: &mut EngineSession,
    paths: &[PathBuf],
    options: &PipelineOptions,
) -> Result<BatchReport, FileError> {
    let mut report = BatchReport::default();

    for path in paths {
        match process_file(session, path, options) {
            Ok(outcome) => report.push(outcome),
            Err(err) if err.is_recoverable() => {
                match &err {
                    FileError::Save(_) => error!(file = %path.display(), error = %err, "save failed"),
                    _ => warn!(file = %path.display(), error = %err, "file skipped"),
                }
                report.push(FileOutcome::new(path, err.into_status()));
            }
            Err(err) => {
                error!(file = %path.display(), error = %err, "batch aborted");
                return Err(err);
            }
        }
    }

    info!(
        transformed = report.transformed(),
        skipped = report.skipped(),
        failed = report.failed(),
        "transform phase complete"
    );
    Ok(report)
}

/// Convert legacy `.xls` statements to `.xlsx` under a single engine session.
///
/// Returns the report plus the converted paths, ready for the transform phase.
pub fn convert_batch(paths: &[PathBuf]) -> (BatchReport, Vec<PathBuf>) {
    let mut session = EngineSession::acquire("convert");
    let mut report = BatchReport::default();
    let mut converted = Vec::new();

    for path in paths {
        match convert_legacy(&mut session, path) {
            Ok(output) => {
                report.push(FileOutcome::new(
                    path,
                    FileStatus::Converted {
                        output: output.clone(),
                    },
                ));
                converted.push(output);
            }
            Err(err) => {
                let status = match &err {
                    ConvertError::Open(_) => FileStatus::Skipped {
                        reason: err.to_string(),
                    },
                    ConvertError::Write { .. } => FileStatus::ConvertFailed {
                        reason: err.to_string(),
                    },
                };
                warn!(file = %path.display(), error = %err, "conversion failed");
                report.push(FileOutcome::new(path, status));
            }
        }
    }

    (report, converted)
}
