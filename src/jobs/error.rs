use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobTableError {
    #[error("Missing Job Title or Job Description column (no column containing '{needle}')")]
    MissingColumn { needle: &'static str },

    #[error("column '{column}' cannot be both the Job Title and the Job Description")]
    AmbiguousColumn { column: String },

    #[error("job CSV has no header row")]
    MissingHeader,

    #[error("failed to read job CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl JobTableError {
    /// Column problems the uploader can fix; reported verbatim.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            JobTableError::MissingColumn { .. } | JobTableError::AmbiguousColumn { .. }
        )
    }
}
