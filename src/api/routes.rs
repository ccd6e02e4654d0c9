use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{
    live::stream_wins,
    stats::{get_headline, get_stats, get_trend},
    wins::{get_totals, post_win},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/wins", post(post_win))
        .route("/api/wins/stream", get(stream_wins))
        .route("/api/totals", get(get_totals))
        .route("/api/stats", get(get_stats))
        .route("/api/trend", get(get_trend))
        .route("/api/headline", get(get_headline))
        .with_state(state)
}
