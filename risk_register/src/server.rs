//! HTTP server exposing the risk register REST API.

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info, instrument};

use crate::{
    error::ApiError,
    id,
    middleware::request_logging_middleware,
    risk::{NewRisk, Risk},
    settings::Settings,
    store::RiskStore,
};

/// Application state shared across HTTP handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub store: RiskStore,
}

impl AppState {
    pub fn new(store: RiskStore) -> Self {
        Self { store }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    risk_count: usize,
}

/// Create the HTTP router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/risks", get(list_risks).post(create_risk))
        .route("/risks/:id", get(get_risk));

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/v1", v1)
        .with_state(state);

    with_middleware(app)
}

/// Request logging outermost, so responses produced for panics are logged too.
fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_logging_middleware))
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

/// Turn a handler panic into a 500 with the usual error body.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(details, "Request handler panicked");

    ApiError::Internal.into_response()
}

/// Health check endpoint
#[instrument(skip(state))]
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        risk_count: state.store.len(),
    })
}

/// List all risks, in no particular order
#[instrument(skip(state))]
async fn list_risks(State(state): State<AppState>) -> Json<Vec<Risk>> {
    Json(state.store.list())
}

/// Create a risk from a JSON body.
///
/// The body is parsed without regard to `Content-Type`. Any `id` supplied by
/// the client is discarded in favour of a generated one.
#[instrument(skip(state, body))]
async fn create_risk(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Risk>), ApiError> {
    let submitted = NewRisk::from_json(&body)?;
    let risk = submitted.validate()?.with_id(id::generate());

    state.store.insert(risk.clone());
    info!(id = %risk.id, state = %risk.state, "Created risk");

    Ok((StatusCode::CREATED, Json(risk)))
}

/// Fetch a single risk by id
#[instrument(skip(state))]
async fn get_risk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Risk>, ApiError> {
    state.store.get(&id).map(Json).ok_or(ApiError::RiskNotFound)
}

/// Start the HTTP server and wait for shutdown signal
pub async fn serve(settings: &Settings) -> Result<()> {
    let addr = settings.bind_addr()?;
    let app = create_router(AppState::new(RiskStore::new()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C, or SIGTERM on unix)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), shutting down gracefully");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        }
    }
}
