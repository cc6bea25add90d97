//! Router-level tests for the gateway handlers, driven through `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use jobmatch::MatchEngine;
use jobmatch::config::DEFAULT_MAX_UPLOAD_BYTES;

use crate::gateway::error::GatewayError;
use crate::gateway::handler::{MatchUpload, ResumeInput, parse_top_k};
use crate::gateway::state::AppState;
use crate::gateway::{JOBMATCH_STATUS_HEADER, create_router_with_state};

const BOUNDARY: &str = "jobmatch-test-boundary";

const RESUME: &str = "Experienced Python developer with machine learning skills";

const JOBS_CSV: &str = "Job Title,Job Description\n\
Gardener,Gardener wanted to prune hedges mow lawns and plant flower beds every spring\n\
Python Developer,We need a Python developer with machine learning experience\n";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn test_router_with_limit(max_upload_bytes: usize) -> Router {
    let engine = Arc::new(MatchEngine::stub().unwrap());
    create_router_with_state(AppState::new(engine, max_upload_bytes))
}

fn test_router() -> Router {
    test_router_with_limit(DEFAULT_MAX_UPLOAD_BYTES)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn test_parse_top_k() {
    assert_eq!(parse_top_k("").unwrap(), None);
    assert_eq!(parse_top_k("  ").unwrap(), None);
    assert_eq!(parse_top_k(" 5 ").unwrap(), Some(5));
    assert!(matches!(parse_top_k("0"), Err(GatewayError::InvalidRequest(_))));
    assert!(matches!(parse_top_k("-3"), Err(GatewayError::InvalidRequest(_))));
    assert!(matches!(parse_top_k("ten"), Err(GatewayError::InvalidRequest(_))));
}

#[test]
fn test_pdf_wins_over_text() {
    let upload = MatchUpload {
        resume_pdf: Some("%PDF-1.4".into()),
        resume_text: Some(RESUME.to_string()),
        jobs: Some(JOBS_CSV.into()),
        top_k: None,
    };
    let (resume, _, _) = upload.into_parts().unwrap();
    assert!(matches!(resume, ResumeInput::Pdf(_)));
}

#[test]
fn test_upload_requires_resume_and_jobs() {
    let no_resume = MatchUpload {
        jobs: Some(JOBS_CSV.into()),
        ..Default::default()
    };
    assert!(matches!(
        no_resume.into_parts(),
        Err(GatewayError::InvalidRequest(_))
    ));

    let no_jobs = MatchUpload {
        resume_text: Some(RESUME.to_string()),
        ..Default::default()
    };
    assert!(matches!(
        no_jobs.into_parts(),
        Err(GatewayError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn test_healthz() {
    let response = test_router()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[JOBMATCH_STATUS_HEADER], "healthy");
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_ready_reports_component_modes() {
    let response = test_router()
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["components"]["encoder"], "stub");
    assert_eq!(json["components"]["phrase_pipeline"], "lexicon");
}

#[tokio::test]
async fn test_index_serves_upload_form() {
    let response = test_router()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/v1/match/csv\""));
    assert!(html.contains("name=\"jobs\""));
}

#[tokio::test]
async fn test_match_json_ranks_related_posting_first() {
    let request = multipart_request(
        "/v1/match",
        &[
            Part::Text("resume_text", RESUME),
            Part::File("jobs", "jobs.csv", JOBS_CSV.as_bytes()),
        ],
    );
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[JOBMATCH_STATUS_HEADER], "matched");

    let json = body_json(response).await;
    assert_eq!(json["postings_scored"], 2);
    assert_eq!(json["encoder"], "stub");
    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["job_title"], "Python Developer");
    assert_eq!(matches[0]["skill_match_percent"], 40.0);
}

#[tokio::test]
async fn test_match_respects_top_k() {
    let request = multipart_request(
        "/v1/match",
        &[
            Part::Text("resume_text", RESUME),
            Part::File("jobs", "jobs.csv", JOBS_CSV.as_bytes()),
            Part::Text("top_k", "1"),
        ],
    );
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["top_k"], 1);
    assert_eq!(json["matches"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_file_part_is_ignored() {
    let request = multipart_request(
        "/v1/match",
        &[
            Part::File("resume", "", b""),
            Part::Text("resume_text", RESUME),
            Part::File("jobs", "jobs.csv", JOBS_CSV.as_bytes()),
        ],
    );
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_match_csv_download() {
    let request = multipart_request(
        "/v1/match/csv",
        &[
            Part::Text("resume_text", RESUME),
            Part::File("jobs", "jobs.csv", JOBS_CSV.as_bytes()),
        ],
    );
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"job_matches.csv\""
    );

    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Job Title,Similarity Score,Skill Match %,Final Score")
    );
    assert!(lines.next().unwrap().starts_with("Python Developer,"));
    assert!(lines.next().unwrap().starts_with("Gardener,"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_missing_jobs_is_bad_request() {
    let request = multipart_request("/v1/match", &[Part::Text("resume_text", RESUME)]);
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[JOBMATCH_STATUS_HEADER], "invalid_request");
    let json = body_json(response).await;
    assert_eq!(json["code"], 400);
    assert!(json["error"].as_str().unwrap().contains("jobs"));
}

#[tokio::test]
async fn test_invalid_top_k_is_bad_request() {
    let request = multipart_request(
        "/v1/match",
        &[
            Part::Text("resume_text", RESUME),
            Part::File("jobs", "jobs.csv", JOBS_CSV.as_bytes()),
            Part::Text("top_k", "0"),
        ],
    );
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_column_is_unprocessable() {
    let request = multipart_request(
        "/v1/match",
        &[
            Part::Text("resume_text", RESUME),
            Part::File("jobs", "jobs.csv", b"name,summary\nx,y\n"),
        ],
    );
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()[JOBMATCH_STATUS_HEADER], "validation_error");
    let json = body_json(response).await;
    assert_eq!(json["code"], 422);
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("Missing Job Title or Job Description column")
    );
}

#[tokio::test]
async fn test_non_pdf_resume_is_unprocessable() {
    let request = multipart_request(
        "/v1/match",
        &[
            Part::File("resume", "resume.pdf", RESUME.as_bytes()),
            Part::File("jobs", "jobs.csv", JOBS_CSV.as_bytes()),
        ],
    );
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()[JOBMATCH_STATUS_HEADER], "extraction_error");
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected() {
    let request = Request::post("/v1/match")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = test_router().oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(response.headers()[JOBMATCH_STATUS_HEADER], "invalid_upload");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let big_description = "x".repeat(4096);
    let csv = format!("Job Title,Job Description\nBig,{big_description}\n");
    let request = multipart_request(
        "/v1/match",
        &[
            Part::Text("resume_text", RESUME),
            Part::File("jobs", "jobs.csv", csv.as_bytes()),
        ],
    );
    let response = test_router_with_limit(1024).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
