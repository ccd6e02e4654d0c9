//! Aggregation engine: pure folds from raw events to dashboard views.
//! Nothing in here touches the store or the clock.

pub mod daily;
pub mod narrative;
pub mod summary;
pub mod totals;
pub mod trend;
pub mod types;

pub use daily::{bucket_by_day, window_start, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
pub use narrative::{classify, recent_real_wins, FallbackReason, Narrative};
pub use summary::{current_lead, recent_games, Lead, RecentGame, WinRate};
pub use totals::compute_totals;
pub use trend::cumulative_trend;
pub use types::{DailyBreakdown, DailyEntry, Totals, TrendPoint};
