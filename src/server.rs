use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api_connection::connection::TextModel;
use crate::api_connection::endpoints::GenerationConfig;
use crate::optim::optimizer::{optimize_day, OptimizationStatus, OptimizeRequest};

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn TextModel>,
}

/// The backend surface: a connectivity probe and the optimization endpoint.
/// CORS is permissive; the reference deployment fronts a browser client on
/// another origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/test", get(test_model))
        .route("/api/optimize-meal-plan", post(optimize_meal_plan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn test_model(State(state): State<AppState>) -> impl IntoResponse {
    match state.model.generate("Say hello", GenerationConfig::default()).await {
        Ok(message) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": message })),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": err.to_string() })),
        ),
    }
}

async fn optimize_meal_plan(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> impl IntoResponse {
    info!(day = %request.day, goal = %request.goal, "optimization request");
    let started = Instant::now();

    let report = optimize_day(state.model.as_ref(), &request).await;

    info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        status = ?report.status,
        "optimization complete"
    );

    let http_status = match report.status {
        OptimizationStatus::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        OptimizationStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        OptimizationStatus::NoSuggestions | OptimizationStatus::Success => StatusCode::OK,
    };
    (http_status, Json(report))
}
