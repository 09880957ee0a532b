//! Language identification model abstraction and the fastText backend

use crate::error::{LangIdError, Result};
use std::path::Path;
use std::sync::Arc;

/// Marker fastText puts in front of every label.
pub const LABEL_PREFIX: &str = "__label__";

/// A single raw prediction as produced by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// An immutable, loaded classifier shared by every detection call.
pub trait LanguageModel: Send + Sync {
    /// Return up to `k` predictions for `text`, best first.
    fn predict(&self, text: &str, k: usize) -> Result<Vec<Prediction>>;
}

/// Reads a model file into memory.
pub trait ModelLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Arc<dyn LanguageModel>>;
}

/// Loader for fastText `.bin` supervised models such as `lid.176.bin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastTextLoader;

#[cfg(feature = "fasttext")]
mod backend {
    use super::*;
    use fasttext::FastText;
    use log::debug;

    pub struct FastTextModel {
        inner: FastText,
    }

    impl LanguageModel for FastTextModel {
        fn predict(&self, text: &str, k: usize) -> Result<Vec<Prediction>> {
            Ok(self
                .inner
                .predict(text, k, 0.0)
                .into_iter()
                .map(|p| Prediction {
                    label: p.label,
                    score: p.prob,
                })
                .collect())
        }
    }

    impl ModelLoader for FastTextLoader {
        fn load(&self, path: &Path) -> Result<Arc<dyn LanguageModel>> {
            // Library errors stop here; callers only see the typed error.
            let inner = FastText::load_model(path).map_err(|e| {
                debug!("fastText rejected {}: {}", path.display(), e);
                LangIdError::ModelUnavailable(format!(
                    "Failed to load fastText model '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            debug!(
                "Loaded fastText model {} ({} labels)",
                path.display(),
                inner.dict().nlabels()
            );
            Ok(Arc::new(FastTextModel { inner }))
        }
    }
}

#[cfg(not(feature = "fasttext"))]
impl ModelLoader for FastTextLoader {
    fn load(&self, path: &Path) -> Result<Arc<dyn LanguageModel>> {
        Err(LangIdError::ModelUnavailable(format!(
            "Cannot load '{}': built without the `fasttext` feature",
            path.display()
        )))
    }
}

/// Strip the fastText label marker, leaving the bare language tag.
pub fn strip_label(label: &str) -> &str {
    label.strip_prefix(LABEL_PREFIX).unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_label() {
        assert_eq!(strip_label("__label__fr"), "fr");
        assert_eq!(strip_label("__label__zh"), "zh");
        assert_eq!(strip_label("en"), "en");
    }

    #[cfg(feature = "fasttext")]
    mod fasttext_backend {
        use super::*;
        use crate::detection::classifier::LanguageClassifier;
        use crate::detection::model_cache::ModelCache;
        use crate::detection::reliability::ReliabilityPolicy;
        use crate::detection::result::{DetectionFailure, DetectionResult};
        use fasttext::args::Args;
        use fasttext::FastText;
        use std::path::PathBuf;
        use tempfile::TempDir;

        const CORPUS: &[(&str, &str)] = &[
            ("fr", "bonjour tout le monde comment allez vous aujourd'hui merci beaucoup"),
            ("en", "hello everyone how are you doing today thank you very much"),
            ("de", "hallo zusammen wie geht es euch heute vielen dank"),
        ];

        /// Train a three-language supervised model and save it as a `.bin` file.
        fn train_tiny_model(dir: &TempDir) -> PathBuf {
            let mut data = String::new();
            for _ in 0..30 {
                for (lang, sentence) in CORPUS {
                    data.push_str(&format!("__label__{} {}\n", lang, sentence));
                }
            }
            let train_path = dir.path().join("train.txt");
            std::fs::write(&train_path, data).unwrap();

            let mut args = Args::default();
            args.input = train_path;
            args.apply_supervised_defaults();
            args.lr = 0.5;
            args.epoch = 50;
            args.dim = 16;
            args.thread = 1;
            args.verbose = 0;

            let model = FastText::train(args).unwrap();
            let model_path = dir.path().join("tiny.bin");
            model.save_model(&model_path).unwrap();
            model_path
        }

        #[test]
        fn test_loader_predicts_raw_labels_up_to_k() {
            let temp_dir = TempDir::new().unwrap();
            let path = train_tiny_model(&temp_dir);

            let model = FastTextLoader.load(&path).unwrap();

            let predictions = model.predict(CORPUS[0].1, 2).unwrap();
            assert_eq!(predictions.len(), 2);
            assert_eq!(predictions[0].label, "__label__fr");
            assert!(predictions.iter().all(|p| p.label.starts_with(LABEL_PREFIX)));
            assert!(predictions.iter().all(|p| (0.0..=1.0).contains(&p.score)));

            assert_eq!(model.predict(CORPUS[1].1, 1).unwrap().len(), 1);
        }

        #[test]
        fn test_classifier_strips_labels_from_fasttext_model() {
            let temp_dir = TempDir::new().unwrap();
            let path = train_tiny_model(&temp_dir);
            let cache = ModelCache::new(Box::new(FastTextLoader));
            let classifier = LanguageClassifier::new(Arc::new(cache), ReliabilityPolicy::default());

            let DetectionResult::Detected(detection) = classifier.detect(Some(CORPUS[2].1), &path)
            else {
                panic!("expected a detection");
            };
            assert_eq!(detection.primary_language, "de");
            assert_eq!(detection.alternatives.len(), 2);
            assert!(detection
                .alternatives
                .iter()
                .all(|a| !a.language.starts_with(LABEL_PREFIX) && a.language != "de"));
            assert!(detection.reliability_warning.is_none());

            let short = classifier.detect(Some("hello"), &path);
            assert!(short.alternatives().is_empty());
            assert!(short.reliability_warning().is_some());
        }

        #[test]
        fn test_corrupt_file_is_unavailable() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("lid.176.bin");
            std::fs::write(&path, b"this is not a fastText model").unwrap();

            let err = FastTextLoader.load(&path).err().unwrap();
            assert!(matches!(err, LangIdError::ModelUnavailable(_)));

            let classifier = LanguageClassifier::new(
                Arc::new(ModelCache::new(Box::new(FastTextLoader))),
                ReliabilityPolicy::default(),
            );
            assert!(matches!(
                classifier.detect(Some(CORPUS[0].1), &path).failure(),
                Some(DetectionFailure::ModelUnavailable(_))
            ));
        }
    }
}
