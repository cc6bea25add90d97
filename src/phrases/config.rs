use std::path::PathBuf;

use crate::constants::TAGGER_WINDOW_WORDS;
use crate::embedding::ModelFiles;

/// Configuration for [`PhraseExtractor`](super::PhraseExtractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseConfig {
    /// Part-of-speech tagger directory. `None` selects the lexicon pipeline.
    pub tagger_dir: Option<PathBuf>,
    /// Words per tagger forward pass.
    pub window_words: usize,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            tagger_dir: None,
            window_words: TAGGER_WINDOW_WORDS,
        }
    }
}

impl PhraseConfig {
    /// Env var naming the tagger model directory.
    pub const ENV_TAGGER_PATH: &'static str = "JOBMATCH_TAGGER_PATH";

    pub fn from_env() -> Self {
        let tagger_dir = std::env::var(Self::ENV_TAGGER_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            tagger_dir,
            ..Default::default()
        }
    }

    /// Config using the tagger in `dir`.
    pub fn tagged<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            tagger_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Config using only the built-in lexicon.
    pub fn lexicon() -> Self {
        Self::default()
    }

    pub fn tagger_files(&self) -> Option<ModelFiles> {
        self.tagger_dir.as_ref().map(ModelFiles::in_dir)
    }
}
