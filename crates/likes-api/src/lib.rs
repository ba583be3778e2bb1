//! # likes-api — Axum API for Like/Unlike Voting
//!
//! Users vote up, down, or clear on albums, photos, reviews, comments, wishes
//! and deals. A vote that changes the object's score fans out into the
//! activity stream and the follow graph; see [`orchestration`].
//!
//! ## API Surface
//!
//! | Path                                   | Module               | Auth    |
//! |----------------------------------------|----------------------|---------|
//! | `/v1/votes/:content_type/:direction`   | [`routes::votes`]    | session |
//! | `/v1/voters/:ct/:id[/:offset/:limit]`  | [`routes::voters`]   | none    |
//! | `/openapi.json`                        | [`openapi`]          | none    |
//! | `/health/liveness`, `/health/readiness`| this module          | none    |
//! | `/metrics`                             | this module          | none    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod orchestration;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use likes_store::SessionStore;

use crate::config::{AppConfig, LogFormat};
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.config.metrics_enabled;

    let mut api = Router::new()
        .merge(routes::votes::router())
        .merge(routes::voters::router())
        .merge(openapi::router());

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(state.metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        probes = probes.route("/metrics", axum::routing::get(prometheus_metrics));
    }

    Router::new().merge(probes.with_state(state)).merge(api)
}

/// Seed the stores from `config` and serve until the listener fails.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let port = config.port;
    let state = AppState::from_config(config).context("seeding in-memory stores")?;
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("likes-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(format: LogFormat, default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// GET /metrics — Prometheus metrics scrape endpoint.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
///
/// Fails when the session store does not answer. Votes in flight do not
/// affect readiness.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.stores.sessions.authenticate("") {
        tracing::warn!("Session store health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "session store unreachable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
