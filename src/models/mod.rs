//! Model file acquisition and management

pub mod model_manager;

pub use model_manager::{ModelInfo, ModelManager};
