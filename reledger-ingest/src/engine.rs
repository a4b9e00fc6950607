//! Scoped access to the spreadsheet engine.
//!
//! One [`EngineSession`] is acquired per phase and lent mutably to each
//! per-file step, so at most one [`SourceDocument`] is open at a time. Both
//! handles release themselves on drop, whichever way the step exits.

use reledger_core::Grid;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::load::{OpenError, load_first_sheet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub opened: usize,
    pub released: usize,
}

#[derive(Debug)]
pub struct EngineSession {
    phase: String,
    opened: Cell<usize>,
    released: Cell<usize>,
}

impl EngineSession {
    pub fn acquire(phase: impl Into<String>) -> Self {
        let phase = phase.into();
        info!(phase = %phase, "engine session acquired");
        Self {
            phase,
            opened: Cell::new(0),
            released: Cell::new(0),
        }
    }

    /// Open the first sheet of `path`. The document borrows the session until dropped.
    pub fn open(&mut self, path: &Path) -> Result<SourceDocument<'_>, OpenError> {
        let grid = load_first_sheet(path)?;
        self.opened.set(self.opened.get() + 1);
        info!(file = %path.display(), rows = grid.rows().len(), "opened");
        Ok(SourceDocument {
            session: self,
            path: path.to_path_buf(),
            grid,
        })
    }

    pub fn phase(&self) -> &str {
        &self.phase
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            opened: self.opened.get(),
            released: self.released.get(),
        }
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        debug!(
            phase = %self.phase,
            opened = self.opened.get(),
            released = self.released.get(),
            "engine session released"
        );
    }
}

/// An open source file.
#[derive(Debug)]
pub struct SourceDocument<'s> {
    session: &'s EngineSession,
    path: PathBuf,
    grid: Grid,
}

impl SourceDocument<'_> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet(&self) -> &Grid {
        &self.grid
    }
}

impl Drop for SourceDocument<'_> {
    fn drop(&mut self) {
        let released = &self.session.released;
        released.set(released.get() + 1);
        debug!(file = %self.path.display(), "closed");
    }
}
