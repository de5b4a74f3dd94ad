use crate::faq::FaqEntry;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_ENV: &str = "NEURALDESK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageConfig,
    history: HistoryConfig,
    faq: FaqConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct StorageConfig {
    data_dir: String,
    persist: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            persist: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct HistoryConfig {
    preload: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { preload: 20 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FaqConfig {
    trainer_file: Option<String>,
    entries: Vec<FaqEntry>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub persist: bool,
    pub history_preload: i64,
    pub trainer_file: Option<PathBuf>,
    pub faq_entries: Vec<FaqEntry>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigFile::default().into()
    }
}

impl From<ConfigFile> for Config {
    fn from(config_file: ConfigFile) -> Self {
        Self {
            data_dir: config_file.storage.data_dir.into(),
            persist: config_file.storage.persist,
            history_preload: config_file.history.preload,
            trainer_file: config_file.faq.trainer_file.map(PathBuf::from),
            faq_entries: config_file.faq.entries,
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config_file: ConfigFile =
            toml::from_str(content).context("Failed to parse config file")?;
        Ok(config_file.into())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Reads `$NEURALDESK_CONFIG` or `config.toml`; a missing file means defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }
}
