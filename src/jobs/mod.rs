//! Job table preparation.
//!
//! Accepts a CSV with arbitrary column names and reduces it to the canonical
//! `Job Title` / `Job Description` table:
//!
//! 1. Column names are trimmed and lower-cased. The first containing `title` is
//!    the title; the first containing `description` (else `desc`) is the
//!    description.
//! 2. Rows with a null in either column are dropped.
//! 3. Rows whose trimmed description is 50 characters or shorter are dropped.
//! 4. Repeated descriptions keep only their first row.

mod error;


pub use error::JobTableError;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::constants::{JOB_DESCRIPTION_COLUMN, JOB_TITLE_COLUMN, MIN_DESCRIPTION_CHARS};

/// Cell values read as missing.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `true` if a raw CSV cell counts as null.
pub fn is_null_cell(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell)
}

/// Untyped table as uploaded: header names plus nullable cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Reads CSV bytes with a header row. Records may be shorter or longer than
    /// the header.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, JobTableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(JobTableError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| (!is_null_cell(cell)).then(|| cell.to_string()))
                    .collect(),
            );
        }

        Ok(Self { headers, rows })
    }
}

/// One usable posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPosting {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Job Description")]
    pub description: String,
}

/// Rows removed while preparing a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareStats {
    pub input_rows: usize,
    pub null_rows: usize,
    pub short_rows: usize,
    pub duplicate_rows: usize,
}

/// Prepared postings, densely indexed from 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobTable {
    postings: Vec<JobPosting>,
}

impl JobTable {
    /// Canonical column names, in order.
    pub const COLUMNS: [&'static str; 2] = [JOB_TITLE_COLUMN, JOB_DESCRIPTION_COLUMN];

    /// Parses and prepares a CSV upload.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, JobTableError> {
        Self::prepare(RawTable::from_csv(bytes)?)
    }

    pub fn prepare(raw: RawTable) -> Result<Self, JobTableError> {
        Self::prepare_with_stats(raw).map(|(table, _)| table)
    }

    /// Like [`prepare`](Self::prepare), also reporting what was dropped.
    pub fn prepare_with_stats(raw: RawTable) -> Result<(Self, PrepareStats), JobTableError> {
        let (title_col, desc_col) = locate_columns(&raw.headers)?;
        debug!(
            title_column = %raw.headers[title_col],
            description_column = %raw.headers[desc_col],
            "Resolved job table columns"
        );

        let mut stats = PrepareStats {
            input_rows: raw.rows.len(),
            ..Default::default()
        };
        let mut seen: HashSet<String> = HashSet::new();
        let mut postings = Vec::new();

        for mut row in raw.rows {
            let title = row.get_mut(title_col).and_then(Option::take);
            let description = row.get_mut(desc_col).and_then(Option::take);

            let (Some(title), Some(description)) = (title, description) else {
                stats.null_rows += 1;
                continue;
            };

            if description.trim().chars().count() <= MIN_DESCRIPTION_CHARS {
                stats.short_rows += 1;
                continue;
            }

            if !seen.insert(description.clone()) {
                stats.duplicate_rows += 1;
                continue;
            }

            postings.push(JobPosting { title, description });
        }

        info!(
            input_rows = stats.input_rows,
            kept = postings.len(),
            null_rows = stats.null_rows,
            short_rows = stats.short_rows,
            duplicate_rows = stats.duplicate_rows,
            "Prepared job table"
        );

        Ok((Self { postings }, stats))
    }

    pub fn columns(&self) -> [&'static str; 2] {
        Self::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JobPosting> {
        self.postings.get(index)
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobPosting> {
        self.postings.iter()
    }
}

impl<'a> IntoIterator for &'a JobTable {
    type Item = &'a JobPosting;
    type IntoIter = std::slice::Iter<'a, JobPosting>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Finds the title and description columns by substring on normalized names.
fn locate_columns(headers: &[String]) -> Result<(usize, usize), JobTableError> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let find = |needle: &str| normalized.iter().position(|h| h.contains(needle));

    let title = find("title").ok_or(JobTableError::MissingColumn { needle: "title" })?;
    let description = find("description")
        .or_else(|| find("desc"))
        .ok_or(JobTableError::MissingColumn {
            needle: "description",
        })?;

    if title == description {
        return Err(JobTableError::AmbiguousColumn {
            column: headers[title].clone(),
        });
    }

    Ok((title, description))
}
