//! Global configuration constants for lexis.db.
//!
//! All tuning parameters, input validation limits, and server defaults are defined here.
//! These are compile-time constants; runtime configuration is handled via CLI arguments
//! in `main.rs`.

/// Number of context characters kept on each side of the highlighted term in a snippet.
pub const SNIPPET_RADIUS_CHARS: usize = 80;

/// Marker appended/prepended to a snippet when it was clipped on that side.
pub const SNIPPET_ELLIPSIS: &str = "...";

/// Opening highlight marker wrapped around the matched query term in a snippet.
pub const SNIPPET_MARK_OPEN: &str = "<mark>";

/// Closing highlight marker.
pub const SNIPPET_MARK_CLOSE: &str = "</mark>";

/// Number of search results per page in the HTTP API.
pub const RESULTS_PER_PAGE: usize = 10;

/// Maximum length of a query string in bytes.
pub const MAX_QUERY_LEN: usize = 1_024;

/// File extension of indexable corpus documents.
pub const CORPUS_FILE_EXT: &str = "txt";

/// File name of the index snapshot inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "index.ldb";

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default directory for index snapshots.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default corpus root: one subdirectory per category, `.txt` files inside.
pub const DEFAULT_CORPUS_DIR: &str = "./corpus";

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Global rate limit in requests per second.
pub const RATE_LIMIT_RPS: u64 = 100;

/// Maximum number of concurrent in-flight requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 512;

/// Maximum HTTP request body size in bytes (1 MB — the API is read-mostly).
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
