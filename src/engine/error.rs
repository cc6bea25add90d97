use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::jobs::JobTableError;
use crate::phrases::PhraseError;
use crate::report::ReportError;
use crate::resume::ExtractionError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Jobs(#[from] JobTableError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Phrases(#[from] PhraseError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl MatchError {
    /// Caused by the uploaded files rather than the service.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MatchError::Jobs(_) | MatchError::Extraction(_))
    }
}
