//! Detection outcome types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageScore {
    pub language: String,
    pub confidence: f32,
}

/// A successful determination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub primary_language: String,
    pub confidence: f32,
    /// Remaining candidates in model order.
    pub alternatives: Vec<LanguageScore>,
    pub reliability_warning: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum DetectionFailure {
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Inference error: {0}")]
    InferenceError(String),
}

/// Outcome of a single `detect` call.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionResult {
    Detected(Detection),
    /// No usable text; not an error.
    Unknown,
    Failed(DetectionFailure),
}

impl DetectionResult {
    pub fn primary_language(&self) -> &str {
        match self {
            DetectionResult::Detected(d) => &d.primary_language,
            DetectionResult::Unknown | DetectionResult::Failed(_) => UNKNOWN_LANGUAGE,
        }
    }

    pub fn confidence(&self) -> f32 {
        match self {
            DetectionResult::Detected(d) => d.confidence,
            DetectionResult::Unknown | DetectionResult::Failed(_) => 0.0,
        }
    }

    pub fn alternatives(&self) -> &[LanguageScore] {
        match self {
            DetectionResult::Detected(d) => &d.alternatives,
            _ => &[],
        }
    }

    pub fn reliability_warning(&self) -> Option<&str> {
        match self {
            DetectionResult::Detected(d) => d.reliability_warning.as_deref(),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&DetectionFailure> {
        match self {
            DetectionResult::Failed(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DetectionResult::Failed(_))
    }

    /// Flatten into the record shape used for JSON output.
    pub fn to_record(&self) -> DetectionRecord {
        DetectionRecord {
            primary_language: self.primary_language().to_string(),
            confidence: self.confidence(),
            alternatives: self.alternatives().to_vec(),
            reliability_warning: self.reliability_warning().map(str::to_string),
            failure: self.failure().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub primary_language: String,
    pub confidence: f32,
    pub alternatives: Vec<LanguageScore>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reliability_warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub failure: Option<DetectionFailure>,
}

impl Serialize for DetectionResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}
