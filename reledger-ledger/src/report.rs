//! What happened to each file in a batch.

use reledger_core::Mop;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Transformed {
        output: PathBuf,
        mop: Mop,
        header_row: usize,
        rows: usize,
    },
    Converted {
        output: PathBuf,
    },
    Skipped {
        reason: String,
    },
    SaveFailed {
        reason: String,
    },
    ConvertFailed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub source: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn new(source: &Path, status: FileStatus) -> Self {
        Self {
            source: source.to_path_buf(),
            status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    pub fn extend(&mut self, other: BatchReport) {
        self.files.extend(other.files);
    }

    pub fn transformed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Transformed { .. }))
    }

    pub fn converted(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Converted { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Skipped { .. }))
    }

    /// Save and conversion failures.
    pub fn failed(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                FileStatus::SaveFailed { .. } | FileStatus::ConvertFailed { .. }
            )
        })
    }

    /// Total ledger rows written across all transformed files.
    pub fn rows_written(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.status {
                FileStatus::Transformed { rows, .. } => rows,
                _ => 0,
            })
            .sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }
}
