//! Language classifier combining the cached model, normalizer and reliability policy

use crate::detection::model::{strip_label, LanguageModel, Prediction};
use crate::detection::model_cache::ModelCache;
use crate::detection::normalizer::normalize;
use crate::detection::reliability::{ReliabilityPolicy, SHORT_TEXT_WARNING};
use crate::detection::result::{Detection, DetectionFailure, DetectionResult, LanguageScore};
use crate::error::LangIdError;
use log::{debug, warn};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

pub struct LanguageClassifier {
    cache: Arc<ModelCache>,
    policy: ReliabilityPolicy,
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        Self::new(ModelCache::global(), ReliabilityPolicy::default())
    }
}

impl LanguageClassifier {
    pub fn new(cache: Arc<ModelCache>, policy: ReliabilityPolicy) -> Self {
        Self { cache, policy }
    }

    /// Classify `text` with the model at `model_path`.
    ///
    /// Never fails: model problems and inference faults come back as
    /// [`DetectionResult::Failed`], missing or blank text as
    /// [`DetectionResult::Unknown`].
    pub fn detect(&self, text: Option<&str>, model_path: &Path) -> DetectionResult {
        let model = match self.cache.get_model(model_path) {
            Ok(model) => model,
            Err(LangIdError::ModelNotFound(path)) => {
                warn!("Model file not found: {}", path.display());
                return DetectionResult::Failed(DetectionFailure::ModelNotFound(path));
            }
            Err(LangIdError::ModelUnavailable(detail)) => {
                warn!("Model could not be loaded: {}", detail);
                return DetectionResult::Failed(DetectionFailure::ModelUnavailable(detail));
            }
            Err(e) => {
                warn!("Model could not be loaded: {}", e);
                return DetectionResult::Failed(DetectionFailure::ModelUnavailable(e.to_string()));
            }
        };

        let normalized = match normalize(text) {
            Ok(normalized) => normalized,
            Err(_) => {
                debug!("No usable text, returning unknown");
                return DetectionResult::Unknown;
            }
        };

        let params = self.policy.classify_params(&normalized);
        debug!(
            "Classifying {} chars with k={}",
            normalized.chars().count(),
            params.candidate_count
        );

        let predictions = match run_inference(model.as_ref(), &normalized, params.candidate_count) {
            Ok(predictions) => predictions,
            Err(detail) => {
                warn!("Inference failed: {}", detail);
                return DetectionResult::Failed(DetectionFailure::InferenceError(detail));
            }
        };

        let mut scores = predictions.into_iter().map(|p| LanguageScore {
            language: strip_label(&p.label).to_string(),
            confidence: p.score.clamp(0.0, 1.0),
        });

        let Some(primary) = scores.next() else {
            return DetectionResult::Failed(DetectionFailure::InferenceError(
                "Model returned no predictions".to_string(),
            ));
        };

        // Short text asks for one candidate; ignore extras a model may return anyway.
        let alternatives = scores.take(params.candidate_count.saturating_sub(1)).collect();

        DetectionResult::Detected(Detection {
            primary_language: primary.language,
            confidence: primary.confidence,
            alternatives,
            reliability_warning: params.warn.then(|| SHORT_TEXT_WARNING.to_string()),
        })
    }
}

/// Run the model, folding both returned errors and panics into a message.
fn run_inference(
    model: &dyn LanguageModel,
    text: &str,
    k: usize,
) -> std::result::Result<Vec<Prediction>, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| model.predict(text, k))) {
        Ok(Ok(predictions)) => Ok(predictions),
        Ok(Err(LangIdError::Inference(detail))) => Err(detail),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("model panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("model panicked: {}", s)
    } else {
        "model panicked".to_string()
    }
}
