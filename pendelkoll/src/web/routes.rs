//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::feed::FeedError;
use crate::planner::{CatalogView, UnknownView};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journeys", get(all_journeys))
        .route("/journeys/:view", get(view_journeys))
        .route("/alerts/poll", post(poll_alerts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All three views.
async fn all_journeys(State(state): State<AppState>) -> Result<Json<CatalogResponse>, AppError> {
    let catalog = state.catalog().await?;
    Ok(Json(CatalogResponse::new(&catalog, &state.config.policy)))
}

/// One view by name.
async fn view_journeys(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<Json<ViewResponse>, AppError> {
    let view: CatalogView = view.parse()?;
    let catalog = state.catalog().await?;
    Ok(Json(ViewResponse::new(&catalog, view, &state.config.policy)))
}

/// Critical journeys in the live views that have not been alerted on yet.
async fn poll_alerts(State(state): State<AppState>) -> Result<Json<AlertsResponse>, AppError> {
    let catalog = state.catalog().await?;
    let policy = &state.config.policy;

    let mut ledger = state.ledger.lock().await;
    let alerts = ledger
        .record_new(catalog.live(), policy)
        .into_iter()
        .map(|j| AlertResult::new(j, policy))
        .collect();

    Ok(Json(AlertsResponse { alerts }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<UnknownView> for AppError {
    fn from(e: UnknownView) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<Arc<FeedError>> for AppError {
    fn from(e: Arc<FeedError>) -> Self {
        match e.as_ref() {
            FeedError::Io { .. } => AppError::Unavailable {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
