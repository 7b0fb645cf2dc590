//! Shared glossary server.
//!
//! A small team dictionary: anyone can browse and search terms, anyone holding
//! the shared admin password can add or update them.
//!
//!
//!
//! # General Infrastructure
//! - Single process, single instance
//! - Terms live in one JSON file next to the binary (see [`store`])
//! - The browser page is static, all filtering happens client side
//! - Long descriptions link to a server-rendered detail page
//!
//!
//!
//! # Routes
//!
//! | Method | Path               | Purpose                                   |
//! |--------|--------------------|-------------------------------------------|
//! | GET    | `/api/dictionary`  | All entries as a JSON array               |
//! | POST   | `/api/dictionary`  | Add or update one entry, password gated   |
//! | POST   | `/api/unlock`      | Check the password before showing the form |
//! | GET    | `/entry/{name}`    | Detail page, name matched case-insensitively |
//! | GET    | `/health`          | Liveness                                  |
//! | GET    | anything else      | Static assets (`index.html`, `script.js`) |
//!
//!
//!
//! # Notes
//!
//! ## Writes
//! The file is rewritten in full after every accepted upsert. If that rewrite
//! fails the entry is lost, yet by default the client still gets a 201, which is
//! how the first version of this service behaved. Set `STRICT_WRITES=true` to
//! answer 500 instead.
//!
//! ## Password
//! The password is only compared on the server. The page asks `/api/unlock`
//! before showing the edit form instead of shipping the secret in the script.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! RUST_LOG=info ADMIN_PASSWORD=changeme cargo run --bin glossary
//! ```
//!
//! Environment.
//! ```sh
//! PORT=3000
//! DICTIONARY_PATH=dictionary.json
//! STATIC_DIR=backend/server/static
//! STRICT_WRITES=false
//! ADMIN_PASSWORD=...   # or /run/secrets/ADMIN_PASSWORD
//! ```
use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;

use config::Config;
use error::AppError;
use routes::{entry_handler, health_handler, list_handler, unlock_handler, upsert_handler};
use state::AppState;

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let state = AppState::new(Config::load());
    info!("Dictionary file: {}", state.store.path().display());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| AppError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("Server running on {address}");

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let assets = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/api/dictionary", get(list_handler).post(upsert_handler))
        .route("/api/unlock", post(unlock_handler))
        .route("/entry/{name}", get(entry_handler))
        .route("/health", get(health_handler))
        .fallback_service(assets)
        .layer(cors)
        .with_state(state)
}

pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
