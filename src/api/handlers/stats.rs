use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::models::ErrorResponse;
use crate::stats::MAX_WINDOW_DAYS;
use super::{AppState, StatsParams};

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> impl IntoResponse {
    let days = params
        .days
        .unwrap_or(state.config.stats.history_days)
        .clamp(1, MAX_WINDOW_DAYS);

    match state.reporting.stats_report(days, Utc::now()) {
        Ok(report) => Json(report).into_response(),
        Err(e) => query_error(e),
    }
}

pub async fn get_trend(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.reporting.trend() {
        Ok(trend) => Json(trend).into_response(),
        Err(e) => query_error(e),
    }
}

pub async fn get_headline(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.reporting.headline() {
        Ok(headline) => Json(headline).into_response(),
        Err(e) => query_error(e),
    }
}

fn query_error(e: crate::errors::PersistenceError) -> axum::response::Response {
    log::error!("Query failed: {}", e);
    (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorResponse::new(format!("Query Error: {}", e)))).into_response()
}
