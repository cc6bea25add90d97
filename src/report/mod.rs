//! Ranked match output: the JSON report and the `job_matches.csv` download.


use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::constants::{REPORT_COLUMNS, REPORT_FILENAME};
use crate::phrases::PipelineMode;
use crate::scoring::MatchResult;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV report: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of one match request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    /// Ranked best first, at most `top_k` rows.
    pub matches: Vec<MatchResult>,
    pub top_k: usize,
    pub postings_scored: usize,
    pub resume_skills: usize,
    pub encoder: &'static str,
    pub phrase_pipeline: PipelineMode,
}

impl MatchReport {
    /// Suggested download name.
    pub const FILENAME: &'static str = REPORT_FILENAME;

    pub fn to_csv(&self) -> Result<Vec<u8>, ReportError> {
        to_csv_bytes(&self.matches)
    }
}

/// Floats keep a trailing `.0` (`40.0`, not `40`).
fn format_score(value: f64) -> String {
    format!("{value:?}")
}

/// Writes the header row and one row per result.
pub fn write_csv<W: io::Write>(results: &[MatchResult], writer: W) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(REPORT_COLUMNS)?;

    for result in results {
        csv.write_record([
            result.job_title.clone(),
            format_score(result.similarity_score),
            format_score(result.skill_match_percent),
            format_score(result.final_score),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Renders results as UTF-8 CSV bytes.
pub fn to_csv_bytes(results: &[MatchResult]) -> Result<Vec<u8>, ReportError> {
    let mut buf = Vec::new();
    write_csv(results, &mut buf)?;
    Ok(buf)
}
