use std::path::{Path, PathBuf};

use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Model hyper-parameters (and label map, for classifiers).
pub const CONFIG_FILE: &str = "config.json";
/// Weights in safetensors format.
pub const WEIGHTS_FILE: &str = "model.safetensors";
/// Hugging Face `tokenizers` definition.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// File layout of a Hugging Face style model directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub dir: PathBuf,
    pub config: PathBuf,
    pub weights: PathBuf,
    pub tokenizer: PathBuf,
}

impl ModelFiles {
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        Self {
            config: dir.join(CONFIG_FILE),
            weights: dir.join(WEIGHTS_FILE),
            tokenizer: dir.join(TOKENIZER_FILE),
            dir,
        }
    }

    /// Name of the first required file that is absent, if any.
    pub fn first_missing(&self) -> Option<&'static str> {
        [
            (CONFIG_FILE, &self.config),
            (WEIGHTS_FILE, &self.weights),
            (TOKENIZER_FILE, &self.tokenizer),
        ]
        .into_iter()
        .find(|(_, path)| !path.is_file())
        .map(|(name, _)| name)
    }

    /// Returns `true` if the directory holds all three model files.
    pub fn is_complete(&self) -> bool {
        self.dir.is_dir() && self.first_missing().is_none()
    }

    /// Checks that the directory and every model file exist.
    pub fn check(&self) -> Result<(), EmbeddingError> {
        if !self.dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.dir.clone(),
            });
        }

        match self.first_missing() {
            Some(file) => Err(EmbeddingError::MissingModelFile {
                dir: self.dir.clone(),
                file,
            }),
            None => Ok(()),
        }
    }
}

/// Loads `tokenizer.json` with truncation at `max_len` tokens.
///
/// With `pad_batches`, batch encodings are padded to the longest member so they
/// can be stacked into one tensor; the attention mask marks the padding.
pub fn load_tokenizer(
    path: &Path,
    max_len: usize,
    pad_batches: bool,
) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer =
        Tokenizer::from_file(path).map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to load {}: {}", path.display(), e),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to configure truncation: {}", e),
        })?;

    if pad_batches {
        let pad_token = "[PAD]".to_string();
        let pad_id = tokenizer.token_to_id(&pad_token).unwrap_or(0);
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            pad_id,
            pad_token,
            ..Default::default()
        }));
    }

    Ok(tokenizer)
}
