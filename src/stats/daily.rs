use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use super::types::DailyBreakdown;
use crate::domain::WinEvent;

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const MAX_WINDOW_DAYS: i64 = 365;

/// Earliest timestamp still inside a trailing window of `days`.
/// Saturates at the earliest representable instant.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Group events by calendar day in `offset` and sum deltas per player
pub fn bucket_by_day(events: &[WinEvent], offset: FixedOffset) -> DailyBreakdown {
    let mut breakdown = DailyBreakdown::default();
    for event in events {
        let date = event.created_at.with_timezone(&offset).date_naive();
        breakdown.add(date, event.player, event.delta.value());
    }
    breakdown
}
