use super::types::{Totals, TrendPoint};
use crate::domain::{sort_chronologically, WinEvent};

/// One point per event, oldest first, carrying both running scores.
///
/// Input order is irrelevant: events are sorted by `(created_at, id)` first,
/// so the same events always produce the same points.
pub fn cumulative_trend(events: &[WinEvent]) -> Vec<TrendPoint> {
    let mut ordered = events.to_vec();
    sort_chronologically(&mut ordered);

    let mut running = Totals::default();
    ordered
        .iter()
        .map(|event| {
            running.add(event.player, event.delta.value());
            TrendPoint {
                timestamp: event.created_at,
                a: running.a,
                b: running.b,
            }
        })
        .collect()
}
