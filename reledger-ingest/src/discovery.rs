//! Find statement exports in a directory by file-name prefix.

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use std::path::{Path, PathBuf};

use crate::convert::converted_path;
use crate::types::SourceFormat;

/// Marker in the names of files this tool wrote; never re-read as input.
pub const TRANSFORMED_MARKER: &str = "_Transformed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    /// Files the transform phase reads directly, sorted by path.
    pub transform: Vec<PathBuf>,
    /// Legacy `.xls` files that need conversion first, sorted by path.
    pub legacy: Vec<PathBuf>,
}

/// List candidate statements under `dir` whose names start with `prefix`.
pub fn discover(dir: &Path, prefix: &str) -> Result<Discovered> {
    let pattern = format!(
        "{}/{}*",
        Pattern::escape(&dir.display().to_string()),
        Pattern::escape(prefix)
    );

    let mut found = Discovered::default();
    for entry in glob(&pattern).context("invalid discovery pattern")? {
        let path = entry.with_context(|| format!("reading {}", dir.display()))?;
        if !path.is_file() {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.contains(TRANSFORMED_MARKER) {
            continue;
        }
        match SourceFormat::from_path(&path) {
            Some(format) if format.is_transformable() => found.transform.push(path),
            Some(_) => found.legacy.push(path),
            None => {}
        }
    }

    found.transform.sort();
    found.legacy.sort();
    Ok(found)
}

impl Discovered {
    /// Add freshly converted files to the transform list, once each.
    pub fn merge_converted(&mut self, converted: impl IntoIterator<Item = PathBuf>) {
        for path in converted {
            if !self.transform.contains(&path) {
                self.transform.push(path);
            }
        }
        self.transform.sort();
    }

    /// Converted twins of the legacy files, as they will be named on disk.
    pub fn expected_conversions(&self) -> Vec<PathBuf> {
        self.legacy.iter().map(|p| converted_path(p)).collect()
    }
}
