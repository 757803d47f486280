use anyhow::{Context, Result};
use passbook_core::DEFAULT_EPSILON;
use passbook_ingest::DEFAULT_Y_TOLERANCE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::{ensure_passbook_home, passbook_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parse: ParseSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSection {
    /// Dialect id, or "auto" to detect from the statement header.
    pub bank: String,
    /// Year for rows that print day and month only.
    pub default_year: Option<i32>,
    /// Balance-delta tolerance, written as a string ("0.01").
    pub epsilon: Decimal,
    /// Vertical tolerance when grouping positioned words into lines.
    pub y_tolerance: f32,
}

impl Default for ParseSection {
    fn default() -> Self {
        Self {
            bank: "auto".to_string(),
            default_year: None,
            epsilon: DEFAULT_EPSILON,
            y_tolerance: DEFAULT_Y_TOLERANCE,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(passbook_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_passbook_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
