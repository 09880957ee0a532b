//! Model acquisition: downloading and managing the language identification model file

use crate::config::ModelConfig;
use crate::error::{LangIdError, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Information about the local model file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub source_url: String,
    pub downloaded: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

/// Manager for the model file - handles download, inspection and removal
pub struct ModelManager {
    models_dir: PathBuf,
    model_file: String,
    download_url: String,
    client: reqwest::Client,
    show_progress: bool,
}

impl ModelManager {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            models_dir: config.models_dir.clone(),
            model_file: config.model_file.clone(),
            download_url: config.download_url.clone(),
            client,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(&self.model_file)
    }

    pub fn is_model_downloaded(&self) -> bool {
        self.model_path().is_file()
    }

    /// Make sure the model file exists locally, downloading it if needed.
    pub async fn ensure_model(&self, force: bool) -> Result<PathBuf> {
        let model_path = self.model_path();

        if !force && self.is_model_downloaded() {
            info!("Model file already present: {}", model_path.display());
            return Ok(model_path);
        }

        fs::create_dir_all(&self.models_dir).await.map_err(|e| {
            LangIdError::Configuration(format!(
                "Failed to create models directory {}: {}",
                self.models_dir.display(),
                e
            ))
        })?;

        info!("Downloading {} to {}", self.download_url, model_path.display());

        let partial_path = self.models_dir.join(format!("{}.part", self.model_file));
        match self.download_to(&partial_path).await {
            Ok(()) => {
                fs::rename(&partial_path, &model_path).await?;
                info!("Model download complete");
                Ok(model_path)
            }
            Err(e) => {
                if fs::metadata(&partial_path).await.is_ok() {
                    if let Err(cleanup) = fs::remove_file(&partial_path).await {
                        warn!("Could not remove partial download: {}", cleanup);
                    }
                }
                Err(e)
            }
        }
    }

    async fn download_to(&self, dest: &Path) -> Result<()> {
        let mut response = self
            .client
            .get(&self.download_url)
            .send()
            .await?
            .error_for_status()?;

        let progress = self.progress_bar(response.content_length());
        let mut file = fs::File::create(dest).await?;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            progress.inc(chunk.len() as u64);
        }

        file.flush().await?;
        progress.finish_and_clear();
        Ok(())
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::with_template(
                    "{spinner} [{bar:40}] {bytes}/{total_bytes} ({eta})",
                ) {
                    bar.set_style(style.progress_chars("=> "));
                }
                bar
            }
            None => ProgressBar::new_spinner(),
        }
    }

    pub async fn model_info(&self) -> ModelInfo {
        let path = self.model_path();
        let metadata = fs::metadata(&path).await.ok().filter(|m| m.is_file());

        ModelInfo {
            downloaded: metadata.is_some(),
            size_bytes: metadata.as_ref().map(|m| m.len()),
            modified: metadata
                .as_ref()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from),
            source_url: self.download_url.clone(),
            path,
        }
    }

    /// Delete the local model file. Returns `false` if there was nothing to remove.
    pub async fn remove_model(&self) -> Result<bool> {
        let path = self.model_path();
        if !self.is_model_downloaded() {
            return Ok(false);
        }
        fs::remove_file(&path).await?;
        info!("Removed model file: {}", path.display());
        Ok(true)
    }
}
