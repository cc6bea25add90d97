//! HTTP client helpers for tests.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// What a match request uploads.
#[derive(Debug, Clone, Default)]
pub struct MatchForm {
    pub resume_pdf: Option<Vec<u8>>,
    pub resume_text: Option<String>,
    pub jobs_csv: Vec<u8>,
    pub top_k: Option<String>,
}

impl MatchForm {
    pub fn text(resume: &str, jobs_csv: &str) -> Self {
        Self {
            resume_text: Some(resume.to_string()),
            jobs_csv: jobs_csv.as_bytes().to_vec(),
            ..Default::default()
        }
    }

    pub fn top_k(mut self, top_k: &str) -> Self {
        self.top_k = Some(top_k.to_string());
        self
    }

    fn into_form(self) -> Form {
        let mut form = Form::new().part(
            "jobs",
            Part::bytes(self.jobs_csv)
                .file_name("jobs.csv")
                .mime_str("text/csv")
                .expect("valid mime"),
        );
        if let Some(pdf) = self.resume_pdf {
            form = form.part("resume", Part::bytes(pdf).file_name("resume.pdf"));
        }
        if let Some(text) = self.resume_text {
            form = form.text("resume_text", text);
        }
        if let Some(top_k) = self.top_k {
            form = form.text("top_k", top_k);
        }
        form
    }
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn match_json(
        &self,
        form: MatchForm,
    ) -> Result<(MatchReportBody, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/match"))
            .multipart(form.into_form())
            .send()
            .await?;

        let status_header = resp
            .headers()
            .get("x-jobmatch-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            200 => Ok((resp.json().await?, status_header)),
            status @ (400 | 413 | 422) => Err(TestClientError::Rejected(status, resp.json().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    /// Returns the `Content-Disposition` header and the CSV body.
    pub async fn match_csv(&self, form: MatchForm) -> Result<(String, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/match/csv"))
            .multipart(form.into_form())
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TestClientError::UnexpectedStatus(status, body));
        }

        let disposition = resp
            .headers()
            .get("content-disposition")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Ok((disposition, resp.text().await?))
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub http: String,
    pub encoder: String,
    pub phrase_pipeline: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchRow {
    pub job_title: String,
    pub similarity_score: f64,
    pub skill_match_percent: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchReportBody {
    pub matches: Vec<MatchRow>,
    pub top_k: usize,
    pub postings_scored: usize,
    pub resume_skills: usize,
    pub encoder: String,
    pub phrase_pipeline: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Rejected with {0}: {1:?}")]
    Rejected(u16, ErrorBody),
}
