//! Embedding + model utilities.
//!
//! - [`encoder`] turns text into sentence embeddings for semantic scoring.
//! - [`bert`] holds the candle BERT wrappers shared by the encoder and the
//!   part-of-speech tagger in [`crate::phrases`].

use std::sync::Arc;

/// BERT encoder and token-classifier wrappers.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder.
pub mod encoder;
mod error;
/// Model-directory and tokenizer helpers.
pub mod utils;

pub use encoder::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig, SentenceEncoder};
pub use error::EmbeddingError;
pub use utils::ModelFiles;

/// Shared, immutable embedding vector.
pub type Embedding = Arc<[f32]>;

/// Scales `values` to unit length in place (zero vectors are left as-is).
pub fn l2_normalize(values: &mut [f32]) {
    let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in values.iter_mut() {
            *x /= norm;
        }
    }
}
