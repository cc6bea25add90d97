use candle_core::{D, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::constants::TAGGER_MAX_SEQ_LEN;
use crate::embedding::bert::BertTokenClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_tokenizer;
use crate::embedding::{EmbeddingError, ModelFiles};

use super::chunker::{RawWord, TaggedWord};
use super::pos::Pos;

/// BERT token classifier producing one part-of-speech tag per word.
pub struct PosTagger {
    model: BertTokenClassifier,
    tokenizer: Tokenizer,
    device: Device,
    tags: Vec<Pos>,
    window_words: usize,
}

impl std::fmt::Debug for PosTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosTagger")
            .field("device", &self.device)
            .field("labels", &self.tags.len())
            .field("window_words", &self.window_words)
            .finish()
    }
}

impl PosTagger {
    /// Loads the tagger from a complete model directory.
    pub fn load(files: &ModelFiles, window_words: usize) -> Result<Self, EmbeddingError> {
        files.check()?;

        let device = select_device("tagger")?;
        let tokenizer = load_tokenizer(&files.tokenizer, TAGGER_MAX_SEQ_LEN, false)?;
        let model = BertTokenClassifier::load(files, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load part-of-speech tagger: {}", e),
            }
        })?;

        let tags: Vec<Pos> = model.labels().iter().map(|l| Pos::from_label(l)).collect();
        let unmapped = tags.iter().filter(|t| **t == Pos::X).count();

        info!(
            model_dir = %files.dir.display(),
            labels = tags.len(),
            unmapped,
            window_words,
            ?device,
            "Part-of-speech tagger loaded"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            tags,
            window_words: window_words.max(1),
        })
    }

    /// Tags `words`, one forward pass per window.
    ///
    /// A window edge is treated as a boundary. Words the tokenizer drops
    /// (truncation, empty sub-tokens) are tagged [`Pos::X`].
    pub fn tag(&self, words: &[RawWord]) -> Result<Vec<TaggedWord>, EmbeddingError> {
        let mut tagged = Vec::with_capacity(words.len());

        for window in words.chunks(self.window_words) {
            let tags = self.tag_window(window)?;
            let last = window.len() - 1;
            for (idx, (word, pos)) in window.iter().zip(tags).enumerate() {
                let mut word = TaggedWord::new(word, pos);
                word.boundary_after |= idx == last;
                tagged.push(word);
            }
        }

        Ok(tagged)
    }

    fn tag_window(&self, window: &[RawWord]) -> Result<Vec<Pos>, EmbeddingError> {
        let input: Vec<&str> = window.iter().map(|w| w.text.as_str()).collect();
        let encoding =
            self.tokenizer
                .encode(input, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        // logits: [1, seq, num_labels]
        let logits = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Tagger forward pass failed: {}", e),
            })?;
        let classes = logits.argmax(D::Minus1)?.squeeze(0)?.to_vec1::<u32>()?;

        debug!(
            words = window.len(),
            tokens = classes.len(),
            "Tagger forward pass"
        );

        // First sub-token decides the word's tag.
        let mut tags: Vec<Option<Pos>> = vec![None; window.len()];
        for (token_idx, word_id) in encoding.get_word_ids().iter().copied().enumerate() {
            let Some(word_idx) = word_id.map(|w| w as usize) else {
                continue;
            };
            let Some(slot) = tags.get_mut(word_idx) else {
                continue;
            };
            if slot.is_none() {
                let class = classes.get(token_idx).copied().unwrap_or_default() as usize;
                *slot = Some(self.tags.get(class).copied().unwrap_or(Pos::X));
            }
        }

        Ok(tags.into_iter().map(|t| t.unwrap_or(Pos::X)).collect())
    }
}
