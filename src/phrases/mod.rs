//! Noun-phrase extraction.
//!
//! Words are tagged either by a BERT part-of-speech model ([`PosTagger`]) or by
//! the built-in [`lexicon`]. Both feed the same chunk grammar in [`chunker`]:
//! a chunk is a maximal run of nouns, proper nouns, adjectives and numbers,
//! trimmed right to its last noun. Each chunk contributes itself and its
//! head-anchored suffixes, lower-cased, if they are 1 to 4 tokens long.

pub mod chunker;
/// Extractor configuration.
pub mod config;
mod error;
pub mod lexicon;
pub mod pos;
/// BERT part-of-speech tagger.
pub mod tagger;


pub use config::PhraseConfig;
pub use error::PhraseError;
pub use pos::Pos;
pub use tagger::PosTagger;

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use chunker::{TaggedWord, collect_phrases, split_words};

/// Deduplicated, lower-cased phrases in sorted order.
pub type PhraseSet = BTreeSet<String>;

/// Which tagging pipeline an extractor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    Tagged,
    Lexicon,
}

impl PipelineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineMode::Tagged => "tagged",
            PipelineMode::Lexicon => "lexicon",
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Pipeline {
    Tagged(PosTagger),
    Lexicon,
}

/// Extracts skill phrases from free text. Read-only once loaded.
pub struct PhraseExtractor {
    pipeline: Pipeline,
    config: PhraseConfig,
}

impl fmt::Debug for PhraseExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("PhraseExtractor");
        s.field("mode", &self.mode());
        if let Pipeline::Tagged(tagger) = &self.pipeline {
            s.field("tagger", tagger);
        }
        s.finish()
    }
}

impl PhraseExtractor {
    /// Loads the extractor.
    ///
    /// An unset or incomplete tagger directory degrades to the lexicon pipeline
    /// with a warning. A complete directory that fails to load is an error.
    pub fn load(config: PhraseConfig) -> Result<Self, PhraseError> {
        let Some(files) = config.tagger_files() else {
            warn!("No part-of-speech tagger configured, using lexicon phrase pipeline");
            return Ok(Self {
                pipeline: Pipeline::Lexicon,
                config,
            });
        };

        if let Err(e) = files.check() {
            warn!(
                tagger_dir = %files.dir.display(),
                error = %e,
                "Part-of-speech tagger unavailable, using lexicon phrase pipeline"
            );
            return Ok(Self {
                pipeline: Pipeline::Lexicon,
                config,
            });
        }

        let tagger = PosTagger::load(&files, config.window_words).map_err(PhraseError::TaggerLoad)?;
        info!(mode = %PipelineMode::Tagged, "Phrase extractor ready");

        Ok(Self {
            pipeline: Pipeline::Tagged(tagger),
            config,
        })
    }

    /// Lexicon-only extractor; never fails.
    pub fn lexicon() -> Self {
        Self {
            pipeline: Pipeline::Lexicon,
            config: PhraseConfig::lexicon(),
        }
    }

    /// Extracts the phrase set of `text`. Empty text yields an empty set.
    pub fn extract(&self, text: &str) -> Result<PhraseSet, PhraseError> {
        let words = split_words(text);
        if words.is_empty() {
            return Ok(PhraseSet::new());
        }

        let tagged: Vec<TaggedWord> = match &self.pipeline {
            Pipeline::Tagged(tagger) => tagger.tag(&words).map_err(PhraseError::Tagging)?,
            Pipeline::Lexicon => words
                .iter()
                .map(|word| TaggedWord::new(word, lexicon::tag(&word.text.to_lowercase())))
                .collect(),
        };

        let mut phrases = PhraseSet::new();
        collect_phrases(&tagged, &mut phrases);

        debug!(
            mode = %self.mode(),
            words = tagged.len(),
            phrases = phrases.len(),
            "Extracted phrases"
        );
        Ok(phrases)
    }

    pub fn mode(&self) -> PipelineMode {
        match self.pipeline {
            Pipeline::Tagged(_) => PipelineMode::Tagged,
            Pipeline::Lexicon => PipelineMode::Lexicon,
        }
    }

    pub fn config(&self) -> &PhraseConfig {
        &self.config
    }
}
