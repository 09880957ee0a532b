//! Input manager for handling different file types

use crate::config::ExtractionConfig;
use crate::error::{LangIdError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PlainTextExtractor, TextExtractor, TikaExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
    tika_endpoint: String,
    timeout: Duration,
    /// Built on the first document that needs the parsing service.
    tika: Option<TikaExtractor>,
}

impl InputManager {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_cache,
            tika_endpoint: config.tika_endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            tika: None,
        }
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.is_file() {
            return Err(LangIdError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Document => {
                let tika = self.tika()?;
                info!("Extracting content via {}: {}", tika.endpoint(), path.display());
                tika.extract(path).await?
            }
        };

        if text.is_empty() {
            info!("No content extracted from {}", path.display());
        } else {
            info!("Extracted {} characters", text.chars().count());
        }

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    fn tika(&mut self) -> Result<&TikaExtractor> {
        let tika = match self.tika.take() {
            Some(tika) => tika,
            None => TikaExtractor::new(&self.tika_endpoint, self.timeout)?,
        };
        Ok(self.tika.insert(tika))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
