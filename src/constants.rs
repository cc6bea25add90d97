//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Score Invariants
//!
//! The blend weights must sum to `1.0` so the final score stays within
//! `[-SEMANTIC_WEIGHT, 1.0]` whenever the semantic score lies in `[-1, 1]` and the
//! skill score in `[0, 1]`. [`ScoringWeights`](crate::scoring::ScoringWeights)
//! enforces the same rule for runtime overrides.

/// Output dimension of the default sentence encoder (all-MiniLM-L6-v2).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token limit of the default sentence encoder; longer inputs are truncated.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Token limit of the BERT part-of-speech tagger.
pub const TAGGER_MAX_SEQ_LEN: usize = 512;

/// Words per tagger window. Leaves headroom for sub-word splitting below
/// [`TAGGER_MAX_SEQ_LEN`].
pub const TAGGER_WINDOW_WORDS: usize = 128;

/// Default number of entries kept by the encoder's embedding cache.
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 1024;

/// Weight of the cosine similarity in the final score.
pub const SEMANTIC_WEIGHT: f64 = 0.6;

/// Weight of the skill overlap in the final score.
pub const SKILL_WEIGHT: f64 = 0.4;

/// Default number of ranked postings returned.
pub const DEFAULT_TOP_K: usize = 10;

/// Descriptions must be strictly longer than this (in characters) to be kept.
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Smallest phrase kept by the extractor, in whitespace tokens.
pub const MIN_PHRASE_TOKENS: usize = 1;

/// Largest phrase kept by the extractor, in whitespace tokens.
pub const MAX_PHRASE_TOKENS: usize = 4;

/// Decimal places of the reported similarity score.
pub const SIMILARITY_DECIMALS: i32 = 3;

/// Decimal places of the reported skill-match percentage.
pub const SKILL_PERCENT_DECIMALS: i32 = 2;

/// Decimal places of the reported final score.
pub const FINAL_SCORE_DECIMALS: i32 = 3;

/// Canonical title column of a prepared job table.
pub const JOB_TITLE_COLUMN: &str = "Job Title";

/// Canonical description column of a prepared job table.
pub const JOB_DESCRIPTION_COLUMN: &str = "Job Description";

/// File name offered for the exported match report.
pub const REPORT_FILENAME: &str = "job_matches.csv";

/// Header row of the exported match report.
pub const REPORT_COLUMNS: [&str; 4] = [
    "Job Title",
    "Similarity Score",
    "Skill Match %",
    "Final Score",
];

const _: () = assert!(MIN_PHRASE_TOKENS >= 1 && MIN_PHRASE_TOKENS <= MAX_PHRASE_TOKENS);
