//! Length-based reliability policy

use serde::{Deserialize, Serialize};

/// Below this many characters the n-gram signature is too unstable to rank alternatives.
pub const DEFAULT_MIN_RELIABLE_CHARS: usize = 20;

/// Candidates requested for text long enough to be reliable: the primary plus two alternatives.
pub const FULL_CANDIDATES: usize = 3;

pub const SHORT_TEXT_WARNING: &str = "Text too short, result may be unreliable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyParams {
    pub candidate_count: usize,
    pub warn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReliabilityPolicy {
    min_reliable_chars: usize,
}

impl Default for ReliabilityPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RELIABLE_CHARS)
    }
}

impl ReliabilityPolicy {
    pub fn new(min_reliable_chars: usize) -> Self {
        Self { min_reliable_chars }
    }

    pub fn min_reliable_chars(&self) -> usize {
        self.min_reliable_chars
    }

    /// Decide how many candidates to request for already-normalized text.
    pub fn classify_params(&self, normalized_text: &str) -> ClassifyParams {
        if normalized_text.chars().count() < self.min_reliable_chars {
            ClassifyParams {
                candidate_count: 1,
                warn: true,
            }
        } else {
            ClassifyParams {
                candidate_count: FULL_CANDIDATES,
                warn: false,
            }
        }
    }
}
