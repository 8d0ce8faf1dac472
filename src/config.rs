use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WizardConfig {
    pub general: GeneralConfig,
    pub server: ServerConfig,
    pub categories: CategoriesConfig,
}

impl WizardConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(default_config_path())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: WizardConfig = toml::from_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("helpq")
        .join("wizard.toml")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    /// Dry run mode - runs against an in-memory backend instead of a live
    /// server, so the wizard can be exercised without credentials
    pub dryrun: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Add Queue".to_string(),
            dryrun: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub login_url: String,
    pub manage_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            login_url: "http://localhost:8000/login/".to_string(),
            manage_url: "http://localhost:8000/manage/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoriesConfig {
    /// Meeting categories the server allows queues to offer
    pub available: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            available: vec![
                "inperson".to_string(),
                "zoom".to_string(),
                "phone".to_string(),
            ],
        }
    }
}
