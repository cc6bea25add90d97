//! jobmatch library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`MatchEngine`], [`MatchError`] - One resume against one job CSV, end to end
//! - [`MatchReport`] - Ranked results plus request metadata
//!
//! ## Stages
//! - [`clean_text`] - Newline and punctuation normalization
//! - [`PhraseExtractor`], [`PhraseConfig`] - Noun-phrase skills (tagger or lexicon)
//! - [`JobTable`], [`RawTable`] - Column sniffing and row filtering for job CSVs
//! - [`SentenceEncoder`], [`EncoderConfig`] - Sentence embeddings (BERT or stub)
//! - [`MatchScorer`], [`rank`] - Blended scoring and top-K ranking
//! - [`ResumeDocument`], [`extract_pdf_text`] - Resume intake
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `JOBMATCH_*` environment settings

pub mod config;
pub mod constants;
pub mod embedding;
pub mod engine;
pub mod jobs;
pub mod phrases;
pub mod report;
pub mod resume;
pub mod scoring;
pub mod text;

pub use config::{Config, ConfigError};
pub use embedding::{
    ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EmbeddingError, EncoderConfig, ModelFiles,
    SentenceEncoder,
};
pub use engine::{MatchEngine, MatchError};
pub use jobs::{JobPosting, JobTable, JobTableError, RawTable};
pub use phrases::{PhraseConfig, PhraseError, PhraseExtractor, PhraseSet, PipelineMode};
pub use report::{MatchReport, ReportError};
pub use resume::{ExtractionError, ResumeDocument, extract_pdf_text};
pub use scoring::{MatchResult, MatchScorer, ScoringError, ScoringWeights, rank};
pub use text::clean_text;
