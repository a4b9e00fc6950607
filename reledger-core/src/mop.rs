//! Method-of-payment tag derived from the statement file name.
//!
//! Statement files are named `HDFC_CC_<holder>_<anything>.<ext>`; the first
//! three underscore-separated tokens identify the card and become the MOP
//! column of every ledger row produced from that file.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

const MOP_TOKENS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MopError {
    #[error("path has no file name")]
    NoFileName,

    #[error("file name '{stem}' has {found} underscore-separated token(s), need at least 3")]
    TooFewTokens { stem: String, found: usize },

    #[error("file name '{stem}' has an empty token at position {position}")]
    EmptyToken { stem: String, position: usize },
}

/// Method of payment, e.g. `HDFC_CC_AB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Mop(String);

impl Mop {
    /// Parse from a bare file stem (no directory, no extension).
    pub fn from_stem(stem: &str) -> Result<Self, MopError> {
        let tokens: Vec<&str> = stem.split('_').take(MOP_TOKENS).collect();
        if tokens.len() < MOP_TOKENS {
            return Err(MopError::TooFewTokens {
                stem: stem.to_string(),
                found: tokens.len(),
            });
        }
        if let Some(position) = tokens.iter().position(|t| t.is_empty()) {
            return Err(MopError::EmptyToken {
                stem: stem.to_string(),
                position: position + 1,
            });
        }
        Ok(Mop(tokens.join("_")))
    }

    /// Parse from a file path, ignoring directory and extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MopError> {
        let stem = path
            .as_ref()
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or(MopError::NoFileName)?;
        Self::from_stem(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
