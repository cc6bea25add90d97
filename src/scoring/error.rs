use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::phrases::PhraseError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("phrase extraction error: {0}")]
    Phrases(#[from] PhraseError),

    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("invalid scoring weights: {reason}")]
    InvalidWeights { reason: String },
}
