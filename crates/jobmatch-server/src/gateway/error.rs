use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use jobmatch::{JobTableError, MatchError};

use super::JOBMATCH_STATUS_HEADER;

/// Shown instead of the details of server-side failures.
const INTERNAL_MESSAGE: &str = "matching failed due to an internal error";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid upload: {0}")]
    Upload(#[from] MultipartError),

    #[error("invalid upload: {0}")]
    NotMultipart(#[from] MultipartRejection),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    /// Status code, status-header value and the message shown to the client.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request", self.to_string())
            }
            GatewayError::Upload(e) => (e.status(), "invalid_upload", self.to_string()),
            GatewayError::NotMultipart(e) => (e.status(), "invalid_upload", self.to_string()),
            GatewayError::Match(MatchError::Jobs(e)) if e.is_validation() => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                e.to_string(),
            ),
            GatewayError::Match(MatchError::Jobs(e @ JobTableError::Csv(_)))
            | GatewayError::Match(MatchError::Jobs(e @ JobTableError::MissingHeader)) => {
                (StatusCode::BAD_REQUEST, "invalid_csv", e.to_string())
            }
            GatewayError::Match(MatchError::Extraction(e)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "extraction_error",
                e.to_string(),
            ),
            GatewayError::Match(_) | GatewayError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                INTERNAL_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, jobmatch_status, error_message) = self.classify();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            JOBMATCH_STATUS_HEADER,
            HeaderValue::from_static(jobmatch_status),
        );

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
