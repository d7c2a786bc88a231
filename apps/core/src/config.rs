use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ranker::ScoringMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_results: u16,
    pub scoring: ScoringMode,
    pub weights_db_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            max_results: 20,
            scoring: ScoringMode::Frequency,
            weights_db_path: base.join("weights.sqlite3"),
            catalog_path: None,
            config_path: base.join("config.toml"),
        }
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    match std::env::var_os("QUICKMENU_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::temp_dir().join("quickmenu"),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Loads the TOML config at `path` (or the default location). A missing
/// file yields the default config rather than an error; a present but
/// unparsable file is an error the caller surfaces.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    let text = match std::fs::read_to_string(&config_path) {
        Ok(text) => text,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            let mut config = Config::default();
            config.config_path = config_path;
            return Ok(config);
        }
        Err(error) => return Err(ConfigError::Io(error)),
    };

    let mut config: Config =
        toml::from_str(&text).map_err(|error| ConfigError::Parse(error.to_string()))?;
    config.config_path = config_path;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    let text =
        toml::to_string_pretty(config).map_err(|error| ConfigError::Parse(error.to_string()))?;
    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.config_path, text)?;
    Ok(())
}

pub fn validate(config: &Config) -> Result<(), String> {
    if config.max_results < 1 || config.max_results > 100 {
        return Err("max_results out of range".into());
    }

    if config.weights_db_path.as_os_str().is_empty() {
        return Err("weights_db_path is required".into());
    }

    if config.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    Ok(())
}
