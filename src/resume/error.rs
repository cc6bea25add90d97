use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded resume is not a PDF")]
    NotPdf,

    #[error("could not read resume PDF: {reason}")]
    Unreadable { reason: String },
}
