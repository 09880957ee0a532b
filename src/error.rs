//! Error handling for the language identification tool

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LangIdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("No usable text after normalization")]
    EmptyInput,

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Content extraction error: {0}")]
    Extraction(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LangIdError>;

/// Convert HTTP client errors to our custom error type
impl From<reqwest::Error> for LangIdError {
    fn from(err: reqwest::Error) -> Self {
        LangIdError::Network(err.to_string())
    }
}
