//! Login service wiring: shared state, router and listener.

pub mod auth;
pub mod content;
pub mod credentials;
pub(crate) mod handlers;
mod openapi;
pub mod session;
mod state;

pub use openapi::openapi;
pub use state::AppState;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Router,
};
use std::{future::pending, net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, warn, Span};
use ulid::Ulid;

/// Build the application router around the shared state.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::page).post(handlers::login))
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &Request<Body>| {
                        HeaderValue::from_str(Ulid::new().to_string().as_str()).ok()
                    },
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the server
/// # Errors
/// Return error if the listener cannot be bound or the server fails
pub async fn new(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        session_mode = %state.sessions().mode(),
        "Listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(async {
            let signal = shutdown_signal().await;
            info!("Gracefully shutdown ({signal})");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).ok();

    tokio::select! {
        res = signal::ctrl_c() => {
            if let Err(err) = res {
                warn!("Failed to listen for ctrl_c: {err}");
            }
            "ctrl_c"
        }
        () = async {
            if let Some(sigterm) = sigterm.as_mut() {
                sigterm.recv().await;
            } else {
                pending::<()>().await;
            }
        } => "sigterm",
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    if let Err(err) = signal::ctrl_c().await {
        warn!("Failed to listen for ctrl_c: {err}");
        pending::<()>().await;
    }
    "ctrl_c"
}
