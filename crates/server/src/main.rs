use clap::Parser;
use lexisdb_core::config;
use lexisdb_core::engine::SearchEngine;
use lexisdb_core::index::build_index;
use lexisdb_core::storage::{load_index, save_index};
use lexisdb_server::api::create_router;
use lexisdb_server::api::handlers::AppState;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexis-db", about = "Boolean search engine over a categorized text corpus")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Data directory for the index snapshot
    #[arg(short, long, default_value = config::DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Corpus root: one subdirectory per category, .txt files inside
    #[arg(short, long, default_value = config::DEFAULT_CORPUS_DIR)]
    corpus_dir: String,

    /// Ignore any existing snapshot and rebuild from the corpus
    #[arg(long, default_value_t = false)]
    rebuild: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    "lexisdb_server=info"
                        .parse()
                        .expect("valid directive literal"),
                )
                .add_directive(
                    "lexisdb_core=info"
                        .parse()
                        .expect("valid directive literal"),
                ),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    let data_path = Path::new(&args.data_dir);
    if data_path.exists() && !data_path.is_dir() {
        eprintln!(
            "Error: data_dir '{}' exists but is not a directory",
            args.data_dir
        );
        std::process::exit(1);
    }

    // Bootstrap: load the snapshot if present and intact, otherwise build
    // from the corpus. A missing or corrupt snapshot is recoverable by
    // rebuilding; a missing corpus is not.
    let loaded = if args.rebuild {
        tracing::info!("--rebuild given, ignoring any existing snapshot");
        None
    } else {
        match load_index(&args.data_dir) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Could not load index snapshot: {}", e);
                None
            }
        }
    };

    let data = match loaded {
        Some(data) => data,
        None => {
            tracing::info!("Building index from corpus at '{}'", args.corpus_dir);
            let (data, report) = match build_index(Path::new(&args.corpus_dir)) {
                Ok(built) => built,
                Err(e) => {
                    eprintln!(
                        "Error: failed to build index from corpus '{}': {}",
                        args.corpus_dir, e
                    );
                    std::process::exit(1);
                }
            };
            if report.files_skipped > 0 {
                tracing::warn!("{} corpus files could not be read and were skipped", report.files_skipped);
            }
            if let Err(e) = save_index(&data, &args.data_dir) {
                tracing::warn!("Failed to save index snapshot: {}", e);
            }
            data
        }
    };

    let stats = data.statistics();
    let engine = SearchEngine::new(data);
    let state = AppState {
        engine,
        corpus_dir: args.corpus_dir.clone(),
        data_dir: args.data_dir.clone(),
        start_time: Instant::now(),
    };
    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", args.port);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        data_dir = %args.data_dir,
        corpus_dir = %args.corpus_dir,
        documents = stats.document_count,
        unique_terms = stats.unique_terms,
        total_terms = stats.total_terms,
        avg_doc_length = stats.avg_doc_length,
        "lexis.db ready"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
