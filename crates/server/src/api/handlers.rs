//! HTTP request handlers and shared application state.

use crate::api::errors::ApiError;
use crate::api::models::*;
use axum::extract::{Path, Query, State};
use axum::Json;
use lexisdb_core::config;
use lexisdb_core::engine::SearchEngine;
use lexisdb_core::index::{build_index, IndexStatistics};
use lexisdb_core::query::query_terms;
use lexisdb_core::storage::save_index;
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State` extractor.
///
/// The engine is the explicit context object: constructed once at startup and
/// cloned (cheap, it's an `Arc` handle) into each handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    pub corpus_dir: String,
    pub data_dir: String,
    pub start_time: Instant,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        document_count: state.engine.document_count(),
    })
}

/// `GET /search?q=<query>&page=<n>`
///
/// Evaluates the boolean query, ranks the matches, and returns one page of
/// results with highlighted snippets. A blank query is not an error — it
/// returns an empty page, mirroring the evaluator's tolerance of malformed
/// boolean syntax.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let q = params.q.unwrap_or_default();
    if q.len() > config::MAX_QUERY_LEN {
        return Err(ApiError::BadRequest(format!(
            "Query exceeds maximum length of {} bytes",
            config::MAX_QUERY_LEN
        )));
    }
    if q.trim().is_empty() {
        return Ok(Json(SearchResponse {
            query: q,
            results: Vec::new(),
            total_results: 0,
            page: 1,
            total_pages: 0,
        }));
    }
    let page = params.page.unwrap_or(1).max(1);

    let results = state.engine.query(&q);
    let terms = query_terms(&q);
    let total_results = results.len();
    let per_page = config::RESULTS_PER_PAGE;
    let total_pages = total_results.div_ceil(per_page);

    // Snippets are only generated for the page actually returned.
    let hits = results
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(|r| SearchHit {
            doc_id: r.document.id.clone(),
            title: r.document.title.clone(),
            category: r.document.category.clone(),
            score: r.score,
            snippet: state.engine.snippet(&r.document.id, &terms).unwrap_or_default(),
        })
        .collect();

    Ok(Json(SearchResponse {
        query: q,
        results: hits,
        total_results,
        page,
        total_pages,
    }))
}

/// `GET /documents/*id`
///
/// Document ids contain a slash (`category/filename`), hence the wildcard route.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let doc = state
        .engine
        .document(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Document '{}' not found", id)))?;
    Ok(Json(DocumentResponse {
        id: doc.id.clone(),
        title: doc.title.clone(),
        category: doc.category.clone(),
        body: doc.body.clone(),
    }))
}

/// `GET /stats`
pub async fn stats(State(state): State<AppState>) -> Json<IndexStatistics> {
    Json(state.engine.statistics())
}

/// `POST /admin/rebuild`
///
/// Rebuilds the index from the corpus directory, saves a fresh snapshot, and
/// swaps the new index in. On failure the serving index is left untouched.
pub async fn rebuild(State(state): State<AppState>) -> Result<Json<RebuildResponse>, ApiError> {
    let started = Instant::now();
    let corpus_dir = state.corpus_dir.clone();

    let (data, report) =
        tokio::task::spawn_blocking(move || build_index(std::path::Path::new(&corpus_dir)))
            .await
            .map_err(|e| ApiError::Internal(format!("Rebuild task failed: {}", e)))?
            .map_err(|e| {
                tracing::error!("Rebuild failed: {}", e);
                ApiError::Internal(format!("Rebuild failed: {}", e))
            })?;

    // The snapshot is best-effort: serving the fresh index matters more.
    if let Err(e) = save_index(&data, &state.data_dir) {
        tracing::warn!("Failed to save snapshot after rebuild: {}", e);
    }

    let document_count = data.doc_count;
    state.engine.replace(data);
    tracing::info!(
        documents = document_count,
        skipped = report.files_skipped,
        "Index rebuilt"
    );

    Ok(Json(RebuildResponse {
        message: "Index rebuilt".to_string(),
        document_count,
        files_skipped: report.files_skipped,
        elapsed_ms: started.elapsed().as_millis(),
    }))
}
