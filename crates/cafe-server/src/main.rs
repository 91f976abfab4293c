//! Cafe Catalog Server
//!
//! Browse, add and delete cafe listings. Pages are rendered on the server
//! and the catalog lives in an embedded SQLite database.

mod config;
mod error;
mod forms;
mod handlers;
mod pages;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::forms::csrf::CsrfGuard;
use crate::storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
    pub csrf: Arc<CsrfGuard>,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        let csrf = CsrfGuard::new(&config.secret_key, config.csrf_ttl_secs, config.csrf_enabled);
        Self {
            db,
            config: Arc::new(config),
            csrf: Arc::new(csrf),
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Cafe Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}, static={}",
        config.bind_address, config.database_path, config.static_dir
    );

    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let app = app(AppState::new(db.clone(), config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down, closing database");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Build the router for the given state.
pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/find.html", get(handlers::cafes::find))
        .route("/delete.html", get(handlers::cafes::delete_list))
        .route("/delete/:id", get(handlers::cafes::delete))
        .route(
            "/add.html",
            get(handlers::add::show).post(handlers::add::submit),
        )
        .route("/health", get(handlers::health))
        .route("/api/cafes", get(handlers::cafes::api_list))
        .nest_service("/static", static_dir)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
