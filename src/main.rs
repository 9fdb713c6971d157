//! Blogposts - HTTP JSON API for blog posts
//!
//! Serves seed/list/get/create/update/delete routes over a Post Store.
//!
//! Storage:
//! - PostgreSQL when `--database-url` / `DATABASE_URL` is given
//! - In-memory otherwise (data is lost on exit)

use std::sync::Arc;

use blogposts::seed::seed_posts;
use blogposts::{routes, AppState, APP_NAME, APP_VERSION, HTTP_BIND_ADDRESS_DEFAULT};
use clap::Parser;
use posts_core::{
    MemoryBackend, PostgresBackend, SharedPostStore, POSTGRES_CONNECTIONS_COUNT_MAX_DEFAULT,
};

// =============================================================================
// CLI
// =============================================================================

/// Blog posts HTTP JSON API
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Blog posts HTTP JSON API")]
#[command(version)]
struct Cli {
    /// HTTP API bind address
    #[arg(short, long, env = "BIND_ADDRESS", default_value = HTTP_BIND_ADDRESS_DEFAULT)]
    bind: String,

    /// PostgreSQL connection URL; the in-memory store is used when unset
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = POSTGRES_CONNECTIONS_COUNT_MAX_DEFAULT)]
    max_connections: u32,

    /// Seed the built-in posts before serving
    #[arg(long)]
    seed_on_start: bool,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "info,tower_http=debug",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .init();

    tracing::info!("{} v{}", APP_NAME, APP_VERSION);

    let store = open_store(&cli).await?;

    if cli.seed_on_start {
        store.seed(&seed_posts()).await?;
        tracing::info!("Seeded built-in posts");
    }

    let app = routes::create_router(AppState::from_shared(Arc::clone(&store)));

    let addr: std::net::SocketAddr = cli.bind.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down, closing store");
    store.close().await;

    Ok(())
}

/// Build the Post Store selected by the CLI.
async fn open_store(cli: &Cli) -> anyhow::Result<SharedPostStore> {
    match &cli.database_url {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL");
            let backend = PostgresBackend::new(url, cli.max_connections).await?;
            Ok(Arc::new(backend))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
