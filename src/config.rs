//! Configuration management for the language identification tool

use crate::detection::reliability::DEFAULT_MIN_RELIABLE_CHARS;
use crate::error::{LangIdError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_FILE: &str = "lid.176.bin";
pub const DEFAULT_MODEL_URL: &str =
    "https://dl.fbaipublicfiles.com/fasttext/supervised-models/lid.176.bin";
pub const DEFAULT_TIKA_ENDPOINT: &str = "http://localhost:9998";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub extraction: ExtractionConfig,
    pub detection: DetectionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub model_file: String,
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub tika_endpoint: String,
    pub timeout_secs: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Normalized texts shorter than this many characters get a single
    /// candidate and a reliability warning.
    pub min_reliable_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".doc-langid")
            .join("models");

        Self {
            model: ModelConfig {
                models_dir,
                model_file: DEFAULT_MODEL_FILE.to_string(),
                download_url: DEFAULT_MODEL_URL.to_string(),
            },
            extraction: ExtractionConfig {
                tika_endpoint: DEFAULT_TIKA_ENDPOINT.to_string(),
                timeout_secs: 60,
                enable_cache: true,
            },
            detection: DetectionConfig {
                min_reliable_chars: DEFAULT_MIN_RELIABLE_CHARS,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                LangIdError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            LangIdError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("doc-langid")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.model.model_file.trim().is_empty() {
            return Err(LangIdError::Configuration(
                "model.model_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.model.models_dir
    }

    /// Full path of the configured model file.
    pub fn model_path(&self) -> PathBuf {
        self.model.models_dir.join(&self.model.model_file)
    }
}
