//! Request and response data transfer objects for the REST API.
//!
//! All types derive `Serialize` and/or `Deserialize` for JSON marshalling via Axum.
//! Index statistics are served directly from `lexisdb_core::index::IndexStatistics`,
//! which already derives `Serialize`.

use serde::{Deserialize, Serialize};

/// Query-string parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// The boolean query string. Missing or blank means an empty result page.
    pub q: Option<String>,
    /// 1-based page number; defaults to 1.
    pub page: Option<usize>,
}

/// One search result: document metadata, score, and a highlighted snippet.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub title: String,
    pub category: String,
    pub score: f64,
    pub snippet: String,
}

/// Response body for `GET /search` with pagination metadata.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub total_results: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Response body for `GET /documents/*id`.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub category: String,
    pub body: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub document_count: usize,
}

/// Response body for `POST /admin/rebuild`.
#[derive(Debug, Serialize)]
pub struct RebuildResponse {
    pub message: String,
    pub document_count: usize,
    pub files_skipped: usize,
    pub elapsed_ms: u128,
}
