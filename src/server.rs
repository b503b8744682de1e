//! HTTP server for generating language cards on demand.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::header,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tokio::signal;
use tokio::time::timeout;
use tracing::{info, instrument};

use crate::config::Config;
use crate::github::GitHubClient;
use crate::options::Validator;
use crate::pipeline::{self, SVG_CONTENT_TYPE};

/// Shared application state
#[derive(Clone)]
struct AppState {
    client: Arc<GitHubClient>,
    validator: Arc<Validator>,
    config: Arc<Config>,
}

/// Middleware to add Server header to all responses
async fn add_server_header(request: axum::extract::Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let version = env!("CARGO_PKG_VERSION");
    let server_header = format!("glot/{}", version);

    if let Ok(header_value) = axum::http::HeaderValue::from_str(&server_header) {
        response.headers_mut().insert(header::SERVER, header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown.
pub async fn start_server(addr: SocketAddr, config: Config) {
    let state = AppState {
        client: Arc::new(GitHubClient::with_token(config.github.token.clone())),
        validator: Arc::new(Validator::from_config(&config)),
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/{username}", get(card_handler))
        .layer(middleware::from_fn(add_server_header))
        .with_state(state);

    info!("Listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to address '{}': {}", addr, e);
            return;
        }
    };

    let server = axum::serve(listener, app);
    let graceful = server.with_graceful_shutdown(shutdown_signal());

    info!("Server starting, press Ctrl+C to shut down.");

    if let Err(e) = graceful.await {
        tracing::error!("Server error: {}", e);
    }
}

/// Listens for the shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, starting graceful shutdown.");
        },
        _ = terminate => {
            info!("Terminate signal received, starting graceful shutdown.");
        },
    }

    match timeout(Duration::from_secs(2), async {
        // Nothing to flush yet; the moka cache is in-memory only
    })
    .await
    {
        Ok(_) => info!("Graceful shutdown complete."),
        Err(_) => tracing::warn!("Graceful shutdown timed out after 2 seconds."),
    }
}

/// Handles index route - redirects to an example card.
///
/// Endpoint: GET /
#[instrument]
async fn index_handler() -> Redirect {
    Redirect::temporary("/octocat")
}

/// Handles health check route - returns simple OK response.
///
/// Endpoint: GET /health
async fn health_handler() -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], "OK").into_response()
}

/// Handles language card requests.
///
/// Endpoint: GET /{username}?layout=compact&locale=de&...
/// Returns: an SVG card on every path, error cards included.
async fn card_handler(
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Response {
    let mut query = params;
    query.insert("username".to_string(), username);

    let card = pipeline::respond(
        state.client.as_ref(),
        &state.validator,
        &state.config.card,
        &query,
    )
    .await;

    (
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, card.cache_control),
        ],
        card.body,
    )
        .into_response()
}
