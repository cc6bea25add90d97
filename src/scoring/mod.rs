//! Resume-to-posting scoring and ranking.
//!
//! Each posting gets a final score blending two signals:
//!
//! - cosine similarity of resume and description embeddings (weight 0.6)
//! - the share of the description's phrases that also occur in the resume (weight 0.4)
//!
//! The three reported numbers are rounded independently; the final score is
//! computed from the unrounded inputs. [`rank`] orders on the rounded value.

pub mod error;
pub mod ranker;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use ranker::rank;
pub use scorer::{MatchScorer, cosine_similarity, skill_overlap};
pub use types::{MatchResult, ScoringWeights, round_to};
