//! Document language identification library

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod pipeline;

pub use config::Config;
pub use detection::{DetectionResult, LanguageClassifier, ModelCache};
pub use error::{LangIdError, Result};
pub use pipeline::{DocumentPipeline, DocumentReport};
