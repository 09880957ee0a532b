//! Process-wide cache of loaded language identification models.
//!
//! Lifecycle: a model moves from unloaded to loaded on the first successful
//! `get_model` call for its path and stays loaded until process exit. Failed
//! loads leave the slot empty so a later call can retry once the file exists.

use crate::detection::model::{FastTextLoader, LanguageModel, ModelLoader};
use crate::error::{LangIdError, Result};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

static GLOBAL_CACHE: OnceLock<Arc<ModelCache>> = OnceLock::new();

pub struct ModelCache {
    loader: Box<dyn ModelLoader>,
    // Held across the load so concurrent first callers wait for one load.
    models: Mutex<HashMap<PathBuf, Arc<dyn LanguageModel>>>,
}

impl ModelCache {
    pub fn new(loader: Box<dyn ModelLoader>) -> Self {
        Self {
            loader,
            models: Mutex::new(HashMap::new()),
        }
    }

    /// The shared cache backed by the fastText loader.
    pub fn global() -> Arc<ModelCache> {
        GLOBAL_CACHE
            .get_or_init(|| Arc::new(ModelCache::new(Box::new(FastTextLoader))))
            .clone()
    }

    /// Return the model for `path`, loading it on first use.
    pub fn get_model(&self, path: &Path) -> Result<Arc<dyn LanguageModel>> {
        let mut models = self
            .models
            .lock()
            .map_err(|_| LangIdError::ModelUnavailable("Model cache lock poisoned".to_string()))?;

        if let Some(model) = models.get(path) {
            return Ok(Arc::clone(model));
        }

        if !path.exists() {
            return Err(LangIdError::ModelNotFound(path.to_path_buf()));
        }

        info!("Loading language model: {}", path.display());
        let started = Instant::now();
        let model = self.loader.load(path)?;
        info!("Model loaded in {:.2?}", started.elapsed());

        models.insert(path.to_path_buf(), Arc::clone(&model));
        Ok(model)
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.models
            .lock()
            .map(|models| models.contains_key(path))
            .unwrap_or(false)
    }

    pub fn loaded_count(&self) -> usize {
        self.models.lock().map(|models| models.len()).unwrap_or(0)
    }
}
