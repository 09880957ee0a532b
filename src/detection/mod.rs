//! Language identification stage
//! Model caching, text normalization, reliability policy and classification

pub mod classifier;
pub mod model;
pub mod model_cache;
pub mod normalizer;
pub mod reliability;
pub mod result;

pub use classifier::LanguageClassifier;
pub use model_cache::ModelCache;
pub use result::{Detection, DetectionFailure, DetectionResult, LanguageScore};
