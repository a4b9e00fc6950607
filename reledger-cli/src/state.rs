use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn reledger_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".reledger"))
}

pub fn ensure_reledger_home() -> Result<PathBuf> {
    let dir = reledger_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
