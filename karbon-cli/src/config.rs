use anyhow::{Context, Result};
use clap::ValueEnum;
use karbon_core::ParseOptions;
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseOptions,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns for the terminal
    #[default]
    Table,
    Csv,
    /// One JSON object per row, in an array
    Json,
}

/// Config directory: `$KARBON_HOME` when set and non-empty, else `$HOME/.karbon`.
fn config_dir(karbon_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = karbon_home.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home
        .filter(|h| !h.is_empty())
        .context("neither KARBON_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".karbon"))
}

pub fn default_config_path() -> Result<PathBuf> {
    let dir = config_dir(env::var_os("KARBON_HOME"), env::var_os("HOME"))?;
    Ok(dir.join("config.toml"))
}

/// Load the config at `path` (or the default location). A missing file
/// yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !p.exists() {
        log::debug!("no config at {}; using defaults", p.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
