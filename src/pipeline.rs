//! Document pipeline: extraction followed by language identification

use crate::detection::{DetectionFailure, DetectionResult, LanguageClassifier};
use crate::error::LangIdError;
use crate::input::InputManager;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

const PREVIEW_CHARS: usize = 200;

/// Outcome of running one document (or raw text) through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub source: String,
    pub extracted_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
    pub preview: String,
    pub detection: DetectionResult,
    pub analyzed_at: DateTime<Utc>,
}

pub struct DocumentPipeline {
    input: InputManager,
    classifier: Arc<LanguageClassifier>,
    model_path: PathBuf,
}

impl DocumentPipeline {
    pub fn new(input: InputManager, classifier: LanguageClassifier, model_path: PathBuf) -> Self {
        Self {
            input,
            classifier: Arc::new(classifier),
            model_path,
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Extract a file and classify its text.
    ///
    /// Extraction failures do not abort: the report records the error and the
    /// detection is the soft unknown outcome.
    pub async fn process(&mut self, file: &Path) -> DocumentReport {
        info!("Processing file: {}", file.display());

        let (text, extraction_error) = match self.input.extract_text(file).await {
            Ok(text) => (Some(text), None),
            Err(e) => {
                warn!("Content extraction failed for {}: {}", file.display(), e);
                (None, Some(e.to_string()))
            }
        };

        let detection = self.classify(text.clone()).await;
        let text = text.unwrap_or_default();

        DocumentReport {
            source: file.display().to_string(),
            extracted_chars: text.chars().count(),
            extraction_error,
            preview: preview(&text, PREVIEW_CHARS),
            detection,
            analyzed_at: Utc::now(),
        }
    }

    /// Classify a raw string, skipping extraction.
    pub async fn process_text(&self, text: &str) -> DocumentReport {
        let detection = self.classify(Some(text.to_string())).await;

        DocumentReport {
            source: "<text>".to_string(),
            extracted_chars: text.chars().count(),
            extraction_error: None,
            preview: preview(text, PREVIEW_CHARS),
            detection,
            analyzed_at: Utc::now(),
        }
    }

    // The first call may load the model from disk, so keep it off the async workers.
    async fn classify(&self, text: Option<String>) -> DetectionResult {
        let classifier = Arc::clone(&self.classifier);
        let model_path = self.model_path.clone();

        let joined = tokio::task::spawn_blocking(move || {
            classifier.detect(text.as_deref(), &model_path)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(e) => {
                let err = LangIdError::Inference(format!("Classification task failed: {}", e));
                warn!("{}", err);
                DetectionResult::Failed(DetectionFailure::InferenceError(err.to_string()))
            }
        }
    }
}

/// First `max_chars` characters, cut back to a word boundary, with an ellipsis when truncated.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut end = 0;
    let mut seen = 0;
    for (idx, word) in text.split_word_bound_indices() {
        seen += word.chars().count();
        if seen > max_chars {
            break;
        }
        end = idx + word.len();
    }

    if end == 0 {
        end = text
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(text.len());
    }

    format!("{}...", text[..end].trim_end())
}
