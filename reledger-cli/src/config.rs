use anyhow::{Context, Result, bail};
use reledger_core::HeaderWindow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_reledger_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputSection,
    pub header_window: WindowSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Statement files must start with this prefix to be picked up.
    pub file_prefix: String,
    /// Convert legacy `.xls` files before the transform phase.
    pub convert_legacy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub first_row: usize,
    pub last_row: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// error | warn | info | debug | trace; `-v` and RUST_LOG take precedence
    pub level: String,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            file_prefix: "HDFC_CC_".to_string(),
            convert_legacy: true,
        }
    }
}

impl Default for WindowSection {
    fn default() -> Self {
        let w = HeaderWindow::default();
        Self {
            first_row: w.first_row,
            last_row: w.last_row,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn header_window(&self) -> Result<HeaderWindow> {
        let WindowSection { first_row, last_row } = self.header_window;
        if first_row == 0 || last_row < first_row {
            bail!("invalid [header_window]: first_row={first_row}, last_row={last_row}");
        }
        Ok(HeaderWindow { first_row, last_row })
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_reledger_home()?.join("config.toml"))
}

/// Load `path`, or `~/.reledger/config.toml` when none is given. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
