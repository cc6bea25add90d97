use axum::{
    Json,
    body::Bytes,
    extract::{
        State,
        multipart::{Multipart, MultipartRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use jobmatch::{MatchError, MatchReport};

use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;
use crate::gateway::{JOBMATCH_STATUS_HEADER, JOBMATCH_STATUS_MATCHED};

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug)]
pub enum ResumeInput {
    Pdf(Bytes),
    Text(String),
}

/// Parsed multipart form of a match request.
#[derive(Debug, Default)]
pub struct MatchUpload {
    pub resume_pdf: Option<Bytes>,
    pub resume_text: Option<String>,
    pub jobs: Option<Bytes>,
    pub top_k: Option<usize>,
}

impl MatchUpload {
    /// A PDF resume wins over pasted text when both are sent.
    pub fn into_parts(self) -> Result<(ResumeInput, Bytes, Option<usize>), GatewayError> {
        let resume = match (self.resume_pdf, self.resume_text) {
            (Some(pdf), _) => ResumeInput::Pdf(pdf),
            (None, Some(text)) => ResumeInput::Text(text),
            (None, None) => {
                return Err(GatewayError::InvalidRequest(
                    "missing `resume` file or `resume_text` field".to_string(),
                ));
            }
        };
        let jobs = self.jobs.ok_or_else(|| {
            GatewayError::InvalidRequest("missing `jobs` CSV file".to_string())
        })?;
        Ok((resume, jobs, self.top_k))
    }
}

pub fn parse_top_k(raw: &str) -> Result<Option<usize>, GatewayError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<usize>() {
        Ok(0) => Err(GatewayError::InvalidRequest(
            "`top_k` must be at least 1".to_string(),
        )),
        Ok(k) => Ok(Some(k)),
        Err(_) => Err(GatewayError::InvalidRequest(format!(
            "`top_k` must be a positive integer, got {raw:?}"
        ))),
    }
}

pub async fn read_upload(mut multipart: Multipart) -> Result<MatchUpload, GatewayError> {
    let mut upload = MatchUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let bytes = field.bytes().await?;
                // Browsers send an empty part for an untouched file input.
                if !bytes.is_empty() {
                    upload.resume_pdf = Some(bytes);
                }
            }
            "resume_text" => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    upload.resume_text = Some(text);
                }
            }
            "jobs" => {
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    upload.jobs = Some(bytes);
                }
            }
            "top_k" => {
                upload.top_k = parse_top_k(&field.text().await?)?;
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(upload)
}

/// Runs the blocking match pipeline off the async reactor.
pub async fn run_match(state: &AppState, upload: MatchUpload) -> Result<MatchReport, GatewayError> {
    let (resume, jobs, top_k) = upload.into_parts()?;
    let engine = state.engine.clone();

    let report = tokio::task::spawn_blocking(move || match resume {
        ResumeInput::Pdf(pdf) => engine.run_pdf(&pdf, &jobs, top_k),
        ResumeInput::Text(text) => engine.run_text(&text, &jobs, top_k),
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("match task failed: {e}")))??;

    info!(
        returned = report.matches.len(),
        postings = report.postings_scored,
        "Match request served"
    );
    Ok(report)
}

fn status_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        JOBMATCH_STATUS_HEADER,
        HeaderValue::from_static(JOBMATCH_STATUS_MATCHED),
    );
    headers
}

#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn match_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, GatewayError> {
    let upload = read_upload(multipart?).await?;
    let report = run_match(&state, upload).await?;

    Ok((StatusCode::OK, status_headers(), Json(report)).into_response())
}

#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn match_csv_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, GatewayError> {
    let upload = read_upload(multipart?).await?;
    let report = run_match(&state, upload).await?;
    let body = report.to_csv().map_err(MatchError::from)?;

    let mut headers = status_headers();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(CSV_CONTENT_TYPE),
    );
    let disposition = format!("attachment; filename=\"{}\"", MatchReport::FILENAME);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| GatewayError::InternalError(e.to_string()))?,
    );

    Ok((StatusCode::OK, headers, body).into_response())
}
