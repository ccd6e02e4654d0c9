use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};
use log::info;
use std::sync::Arc;

use crate::domain::WinEvent;
use super::AppState;

/// Server-sent stream of every event recorded after the client connects.
/// The feed subscription lives as long as the response body.
pub async fn stream_wins(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let listener = state.feed.listen();
    info!("Live stream client connected ({} feed subscribers)", state.feed.subscriber_count());

    let events = stream::unfold(listener, |mut listener| async move {
        let event = listener.recv().await?;
        Some((to_sse(&event), listener))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_sse(event: &WinEvent) -> Result<Event, axum::Error> {
    Event::default()
        .event("win")
        .id(event.id.to_string())
        .json_data(event)
}
