//! Sentence encoder (BERT + mean pooling) with a content-addressed cache.
//!
//! Use [`EncoderConfig::stub`] for tests and model-less runs. Stub embeddings are
//! hashed bags of content words, so texts sharing vocabulary stay similar.

/// Encoder configuration.
pub mod config;


pub use config::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};

use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use moka::sync::Cache;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertEncoderModel;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer;
use crate::embedding::{Embedding, l2_normalize};
use crate::phrases::lexicon;

/// Inputs per forward pass when encoding a batch.
const MAX_BATCH: usize = 32;

enum EncoderBackend {
    Model {
        model: BertEncoderModel,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Text-to-vector encoder. Read-only after [`load`](Self::load); safe to share across threads.
pub struct SentenceEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
    cache: Option<Cache<blake3::Hash, Embedding>>,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .field("cache_capacity", &self.config.cache_capacity)
            .finish()
    }
}

impl SentenceEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(mut config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let cache = (config.cache_capacity > 0).then(|| Cache::new(config.cache_capacity));

        if config.testing_stub {
            warn!("Sentence encoder running in STUB mode (hashed bag-of-words)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
                cache,
            });
        }

        let device = select_device("encoder")?;
        let files = config.files();

        let tokenizer = load_tokenizer(&files.tokenizer, config.max_seq_len, true)?;
        let model = BertEncoderModel::load(&files, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;

        if model.hidden_size() != config.embedding_dim {
            debug!(
                configured = config.embedding_dim,
                hidden_size = model.hidden_size(),
                "Using model hidden size as embedding dimension"
            );
            config.embedding_dim = model.hidden_size();
        }

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            ?device,
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
            cache,
        })
    }

    /// Stub encoder with default settings.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EncoderConfig::stub())
    }

    /// Encodes one text into an L2-normalized vector.
    pub fn encode(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let key = blake3::hash(text.as_bytes());
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            return Ok(hit);
        }

        let embedding: Embedding = match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => {
                let mut rows = self.forward(&[text], model, tokenizer, device)?;
                rows.pop().ok_or_else(|| EmbeddingError::InferenceFailed {
                    reason: "encoder returned no rows".to_string(),
                })?
            }
            EncoderBackend::Stub => self.encode_stub(text),
        }
        .into();

        if let Some(cache) = &self.cache {
            cache.insert(key, embedding.clone());
        }
        Ok(embedding)
    }

    /// Encodes many texts; output order matches input order.
    ///
    /// Cached and duplicate texts are encoded at most once.
    pub fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let EncoderBackend::Model {
            model,
            tokenizer,
            device,
        } = &self.backend
        else {
            return texts.iter().map(|text| self.encode(text)).collect();
        };

        let keys: Vec<blake3::Hash> = texts.iter().map(|t| blake3::hash(t.as_bytes())).collect();
        let mut resolved: Vec<Option<Embedding>> = keys
            .iter()
            .map(|key| self.cache.as_ref().and_then(|c| c.get(key)))
            .collect();

        let mut pending: Vec<usize> = Vec::new();
        for (idx, key) in keys.iter().enumerate() {
            if resolved[idx].is_none() && !pending.iter().any(|&p| keys[p] == *key) {
                pending.push(idx);
            }
        }

        debug!(
            total = texts.len(),
            to_encode = pending.len(),
            "Encoding batch"
        );

        for group in pending.chunks(MAX_BATCH) {
            let inputs: Vec<&str> = group.iter().map(|&idx| texts[idx]).collect();
            let rows = self.forward(&inputs, model, tokenizer, device)?;
            for (&idx, row) in group.iter().zip(rows) {
                let embedding: Embedding = row.into();
                if let Some(cache) = &self.cache {
                    cache.insert(keys[idx], embedding.clone());
                }
                resolved[idx] = Some(embedding);
            }
        }

        // Duplicates of an encoded text share its vector.
        for idx in 0..resolved.len() {
            if resolved[idx].is_none() {
                let source = keys
                    .iter()
                    .position(|key| *key == keys[idx])
                    .and_then(|first| resolved[first].clone());
                resolved[idx] = source;
            }
        }

        resolved
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| EmbeddingError::InferenceFailed {
                    reason: "batch encoding left an input unresolved".to_string(),
                })
            })
            .collect()
    }

    fn forward(
        &self,
        texts: &[&str],
        model: &BertEncoderModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let ids = encodings
            .iter()
            .map(|e| Tensor::new(e.get_ids(), device))
            .collect::<candle_core::Result<Vec<_>>>()?;
        let masks = encodings
            .iter()
            .map(|e| Tensor::new(e.get_attention_mask(), device))
            .collect::<candle_core::Result<Vec<_>>>()?;

        let input_ids = Tensor::stack(&ids, 0)?;
        let attention_mask = Tensor::stack(&masks, 0)?;
        let token_type_ids = input_ids.zeros_like()?;

        debug!(
            batch = texts.len(),
            seq_len = input_ids.dim(1)?,
            "Encoder forward pass"
        );

        // hidden: [batch, seq, hidden]
        let hidden = model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Transformer forward pass failed: {}", e),
            })?;

        // Mean over real tokens only, so padding never shifts a row.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
        let pooled = summed.broadcast_div(&counts)?;

        let mut rows = pooled.to_vec2::<f32>()?;
        for row in &mut rows {
            l2_normalize(row);
        }
        Ok(rows)
    }

    fn encode_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.embedding_dim;
        let mut embedding = vec![0.0f32; dim];

        for term in crate::text::terms(text).filter(|t| !lexicon::is_function_word(t)) {
            let digest = blake3::hash(term.as_bytes());
            let bytes = digest.as_bytes();

            let mut head = [0u8; 8];
            head.copy_from_slice(&bytes[..8]);
            let bucket = (u64::from_le_bytes(head) % dim as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };

            embedding[bucket] += sign;
        }

        l2_normalize(&mut embedding);
        embedding
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// `"model"` or `"stub"`, for health and report output.
    pub fn mode(&self) -> &'static str {
        match self.backend {
            EncoderBackend::Model { .. } => "model",
            EncoderBackend::Stub => "stub",
        }
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Number of cached embeddings (approximate; the cache evicts lazily).
    pub fn cached_entries(&self) -> u64 {
        self.cache.as_ref().map_or(0, |c| c.entry_count())
    }
}
