//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then a JSON config file, then the
//! `FLOWMAKER_CATALOG` environment variable, then the `--catalog` flag.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const CONFIG_ENV: &str = "FLOWMAKER_CONFIG";
pub const CATALOG_ENV: &str = "FLOWMAKER_CATALOG";
const DEFAULT_CATALOG: &str = "flows.csv";
const USER_CONFIG_REL: &str = "flowmaker/config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub schema_version: u32,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// Directory Output steps write reports into.
    #[serde(default = "current_dir")]
    pub report_dir: PathBuf,
    /// Directory file-input steps resolve entered names against.
    #[serde(default = "current_dir")]
    pub import_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        default_config()
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG)
}

fn current_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_config() -> AppConfig {
    AppConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        catalog_path: default_catalog_path(),
        report_dir: current_dir(),
        import_dir: current_dir(),
    }
}

/// Load a config file. Missing optional fields take their defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: AppConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(config)
}

pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.catalog_path.as_os_str().is_empty() {
        return Err(anyhow!("catalog_path must be non-empty"));
    }
    if config.catalog_path.file_name().is_none() {
        return Err(anyhow!(
            "catalog_path must name a file (got {:?})",
            config.catalog_path
        ));
    }
    for (label, dir) in [("report_dir", &config.report_dir), ("import_dir", &config.import_dir)] {
        if dir.as_os_str().is_empty() {
            return Err(anyhow!("{label} must be non-empty"));
        }
    }
    Ok(())
}

/// Where each configuration layer comes from. `from_env` fills the
/// environment-backed fields; tests build it directly.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub config_flag: Option<PathBuf>,
    pub config_env: Option<PathBuf>,
    pub user_config: Option<PathBuf>,
    pub catalog_env: Option<PathBuf>,
    pub catalog_flag: Option<PathBuf>,
}

impl ConfigSources {
    pub fn from_env(config_flag: Option<PathBuf>, catalog_flag: Option<PathBuf>) -> Self {
        let non_empty = |key: &str| {
            std::env::var_os(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        Self {
            config_flag,
            config_env: non_empty(CONFIG_ENV),
            user_config: dirs::config_dir().map(|dir| dir.join(USER_CONFIG_REL)),
            catalog_env: non_empty(CATALOG_ENV),
            catalog_flag,
        }
    }

    /// The config file to read, if any. An explicit flag or environment
    /// path must exist; the per-user file is only used when present.
    fn config_file(&self) -> Option<&Path> {
        if let Some(path) = self.config_flag.as_deref().or(self.config_env.as_deref()) {
            return Some(path);
        }
        self.user_config.as_deref().filter(|path| path.is_file())
    }
}

pub fn resolve_config(sources: &ConfigSources) -> Result<AppConfig> {
    let mut config = match sources.config_file() {
        Some(path) => {
            let config = load_config(path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => default_config(),
    };
    if let Some(catalog) = sources
        .catalog_flag
        .as_ref()
        .or(sources.catalog_env.as_ref())
    {
        config.catalog_path = catalog.clone();
    }
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
