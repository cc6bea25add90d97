//! Resume intake: PDF text extraction, normalization and skill phrases.

mod error;


pub use error::ExtractionError;

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, warn};

use crate::phrases::{PhraseError, PhraseExtractor, PhraseSet};
use crate::text::clean_text;

/// Returns `true` if `bytes` start with the PDF magic header.
pub fn bytes_look_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}

fn panic_reason(payload: Box<dyn std::any::Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "PDF parser panicked".to_string())
}

/// Extracts the text of every page, concatenated in page order.
///
/// Pages without a text layer contribute nothing. A document that cannot be
/// opened at all is an [`ExtractionError`].
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !bytes_look_like_pdf(bytes) {
        return Err(ExtractionError::NotPdf);
    }

    let by_pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match by_pages {
        Ok(Ok(pages)) => {
            let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
            debug!(pages = pages.len(), empty_pages = empty, "Extracted resume PDF");
            return Ok(pages.concat());
        }
        Ok(Err(e)) => warn!(error = %e, "Per-page PDF extraction failed, retrying whole document"),
        Err(payload) => warn!(
            reason = %panic_reason(payload),
            "Per-page PDF extraction panicked, retrying whole document"
        ),
    }

    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Unreadable {
            reason: e.to_string(),
        }),
        Err(payload) => Err(ExtractionError::Unreadable {
            reason: panic_reason(payload),
        }),
    }
}

/// A resume reduced to what scoring needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeDocument {
    #[serde(skip)]
    pub raw_text: String,
    pub cleaned_text: String,
    pub skills: PhraseSet,
}

impl ResumeDocument {
    /// Normalizes `raw_text` and extracts skill phrases from the cleaned text.
    pub fn from_text(
        raw_text: impl Into<String>,
        phrases: &PhraseExtractor,
    ) -> Result<Self, PhraseError> {
        let raw_text = raw_text.into();
        let cleaned_text = clean_text(&raw_text);
        let skills = phrases.extract(&cleaned_text)?;

        debug!(
            raw_chars = raw_text.len(),
            cleaned_chars = cleaned_text.len(),
            skills = skills.len(),
            "Parsed resume"
        );

        Ok(Self {
            raw_text,
            cleaned_text,
            skills,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned_text.is_empty()
    }
}
