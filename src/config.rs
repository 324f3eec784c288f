use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SERPER_API_KEY_ENV: &str = "SAGELYTICS_SERPER_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "SAGELYTICS_OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub search: SearchConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub log_level: String,
    pub color: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    #[serde(
        default,
        serialize_with = "crate::utils::format::serialize_option_string",
        deserialize_with = "crate::utils::format::deserialize_option_string"
    )]
    pub api_key: Option<String>,
    pub country: String,
    pub language: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    #[serde(
        default,
        serialize_with = "crate::utils::format::serialize_option_string",
        deserialize_with = "crate::utils::format::deserialize_option_string"
    )]
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub default_baseline: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://google.serper.dev/search".to_string(),
            api_key: None,
            country: "us".to_string(),
            language: "en".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_baseline: crate::pricing::DEFAULT_BASELINE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                log_level: "info".to_string(),
                color: true,
                format: OutputFormat::Table,
            },
            search: SearchConfig::default(),
            llm: LlmConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl SearchConfig {
    /// API key from config, falling back to the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(SERPER_API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
    }
}

impl LlmConfig {
    /// API key from config, falling back to the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(OPENAI_API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| AppError::Io(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::System(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.log_level.trim().is_empty() {
            return Err(AppError::System("Log level cannot be empty".to_string()));
        }

        if url::Url::parse(&self.search.endpoint).is_err() {
            return Err(AppError::System(format!(
                "Search endpoint is not a valid URL: {}",
                self.search.endpoint
            )));
        }

        if url::Url::parse(&self.llm.endpoint).is_err() {
            return Err(AppError::System(format!(
                "LLM endpoint is not a valid URL: {}",
                self.llm.endpoint
            )));
        }

        if self.llm.model.trim().is_empty() {
            return Err(AppError::System("LLM model cannot be empty".to_string()));
        }

        if self.search.timeout_secs == 0 || self.llm.timeout_secs == 0 {
            return Err(AppError::System(
                "Timeouts must be at least one second".to_string(),
            ));
        }

        if !(self.pricing.default_baseline.is_finite() && self.pricing.default_baseline > 0.0) {
            return Err(AppError::System(
                "Default baseline price must be a positive number".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content).map_err(|e| AppError::Io(e.to_string()))?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sagelytics")
            .join("config.toml")
    }
}
