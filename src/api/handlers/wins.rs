use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{ErrorResponse, RecordWinRequest};
use crate::domain::Delta;
use super::AppState;

pub async fn post_win(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordWinRequest>,
) -> impl IntoResponse {
    let delta = match Delta::try_from(request.delta) {
        Ok(delta) => delta,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))).into_response(),
    };

    match state.recording.record(request.player, delta) {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(format!("Failed to record win: {}", e))),
        )
            .into_response(),
    }
}

pub async fn get_totals(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.reporting.totals() {
        Ok(totals) => Json(totals).into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorResponse::new(format!("Query Error: {}", e)))).into_response(),
    }
}
