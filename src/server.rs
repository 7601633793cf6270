//! Router assembly and server lifecycle

use crate::api;
use crate::auth::{self, Verifier};
use crate::config::Config;
use crate::error::Result;
use crate::middleware;
use crate::respond::{Negotiate, Problem};
use crate::store::ProfileStore;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Request body cap, 1 MiB.
const MAX_BODY_BYTES: usize = 1 << 20;

// ============================================================================
// State
// ============================================================================

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Profile persistence backend
    pub store: Arc<dyn ProfileStore>,
    /// Bearer token verifier guarding profile routes
    pub verifier: Arc<dyn Verifier>,
}

// ============================================================================
// Router
// ============================================================================

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let profile = Router::new()
        .route(
            "/profile",
            routing::post(api::profile::create)
                .get(api::profile::get)
                .patch(api::profile::update)
                .delete(api::profile::delete),
        )
        .route_layer(from_fn_with_state(
            state.verifier.clone(),
            auth::require_auth,
        ));

    let v1 = Router::new()
        .route(
            "/hello",
            routing::get(api::hello::get).post(api::hello::create),
        )
        .route("/items", routing::get(api::items::list))
        .merge(profile);

    Router::new()
        .route("/health", routing::get(api::health::get))
        .nest("/v1", v1)
        .fallback(not_found)
        .layer(from_fn(middleware::security_headers))
        .layer(from_fn(middleware::vary))
        .layer(middleware::cors())
        .layer(from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Unmatched routes render as a negotiated problem rather than a bare 404.
async fn not_found(Negotiate(format): Negotiate) -> Response {
    Problem::not_found("resource not found")
        .with_format(format)
        .into_response()
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Bind and serve until a shutdown signal arrives.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        environment = %config.environment,
        %addr,
        "server listening"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolve when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}
