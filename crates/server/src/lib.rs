//! lexisdb-server — HTTP server for lexis.db.
//!
//! Provides the REST presentation layer: search, document retrieval, index
//! statistics, and admin rebuild. Engine logic lives in `lexisdb-core`.

/// REST API layer: Axum router, HTTP handlers, models, errors.
pub mod api;
