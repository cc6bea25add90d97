use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("part-of-speech tagger failed to load: {0}")]
    TaggerLoad(#[source] EmbeddingError),

    #[error("part-of-speech tagging failed: {0}")]
    Tagging(#[source] EmbeddingError),
}
