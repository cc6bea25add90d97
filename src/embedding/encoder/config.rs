use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::ModelFiles;

/// Default encoder output dimension.
pub const ENCODER_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default encoder token limit.
pub const ENCODER_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEncoder`](super::SentenceEncoder).
pub struct EncoderConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Max tokens per input; longer inputs are truncated.
    pub max_seq_len: usize,
    /// Output dimension. Replaced by the model's hidden size once a model loads.
    pub embedding_dim: usize,
    /// Entries kept in the embedding cache (`0` disables it).
    pub cache_capacity: u64,
    /// If true, produce deterministic hashed embeddings (no model files required).
    pub testing_stub: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: ENCODER_MAX_SEQ_LEN,
            embedding_dim: ENCODER_EMBEDDING_DIM,
            cache_capacity: crate::constants::DEFAULT_EMBEDDING_CACHE_CAPACITY,
            testing_stub: false,
        }
    }
}

impl EncoderConfig {
    /// Env var naming the encoder model directory.
    pub const ENV_MODEL_PATH: &'static str = "JOBMATCH_ENCODER_PATH";

    /// Env var that selects the stub encoder (`true`/`1`).
    pub const ENV_STUB: &'static str = "JOBMATCH_ENCODER_STUB";

    /// Reads the encoder settings from the environment.
    ///
    /// The stub is used only when `JOBMATCH_ENCODER_STUB` is truthy. With
    /// neither variable set the config has no model directory and fails
    /// [`validate`](Self::validate).
    pub fn from_env() -> Self {
        let stub = std::env::var(Self::ENV_STUB)
            .ok()
            .and_then(|v| crate::config::parse_flag(&v))
            .unwrap_or(false);
        if stub {
            return Self::stub();
        }

        std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; deterministic hashed embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Validates fields; non-stub configs must point at a complete model directory.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        self.files().check()
    }

    /// Model file layout under `model_dir`.
    pub fn files(&self) -> ModelFiles {
        ModelFiles::in_dir(&self.model_dir)
    }
}
