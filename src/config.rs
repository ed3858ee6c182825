use crate::error::{Result, VitalsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_USER_ID: &str = "user-001";

/// UI language handed to the vendor SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl FromStr for Language {
    type Err = VitalsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(VitalsError::Api(format!(
                "Unknown language '{}': expected en or ar",
                other
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ar => write!(f, "ar"),
        }
    }
}

/// Configuration for vitals, stored in config.json next to the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VitalsConfig {
    /// UI language (also passed to the measurement SDK)
    #[serde(default)]
    pub language: Language,

    /// User identifier handed to the SDK at initialization
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Vendor SDK API key, if configured
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            user_id: default_user_id(),
            api_key: None,
        }
    }
}

impl VitalsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: VitalsConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
