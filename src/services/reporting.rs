use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use crate::config::settings::AppConfig;
use crate::errors::PersistenceError;
use crate::stats::{
    self, current_lead, recent_games, DailyEntry, Lead, Narrative, RecentGame, Totals, TrendPoint,
    WinRate,
};
use crate::store::WinStore;

#[derive(Debug, Clone, Serialize)]
pub struct Headline {
    pub narrative: Narrative,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub window_days: i64,
    pub totals: Totals,
    pub windowed_totals: Totals,
    pub daily_wins: Vec<DailyEntry>,
    pub recent_games: Vec<RecentGame>,
    pub win_rate: WinRate,
    pub leader: Option<Lead>,
    pub headline: Headline,
}

/// Fetches events and folds them into the dashboard views. Every call reads
/// the store afresh; nothing is cached between calls.
#[derive(Clone)]
pub struct ReportingService {
    store: Arc<dyn WinStore>,
    config: AppConfig,
}

impl ReportingService {
    pub fn new(store: Arc<dyn WinStore>, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn totals(&self) -> Result<Totals, PersistenceError> {
        let events = self.store.query_all()?;
        Ok(stats::compute_totals(&events))
    }

    pub fn trend(&self) -> Result<Vec<TrendPoint>, PersistenceError> {
        let events = self.store.query_all()?;
        Ok(stats::cumulative_trend(&events))
    }

    pub fn headline(&self) -> Result<Headline, PersistenceError> {
        let events = self.store.query_all()?;
        let totals = stats::compute_totals(&events);
        Ok(self.build_headline(&events, totals))
    }

    /// `window_days` is clamped to `1..=MAX_WINDOW_DAYS`
    pub fn stats_report(&self, window_days: i64, now: DateTime<Utc>) -> Result<StatsReport, PersistenceError> {
        let window_days = window_days.clamp(1, stats::MAX_WINDOW_DAYS);
        let since = stats::window_start(now, window_days);
        let windowed = self.store.query_since(since)?;
        let all = self.store.query_all()?;
        debug!(
            "Building report from {} events ({} in the last {} days)",
            all.len(),
            windowed.len(),
            window_days
        );

        let totals = stats::compute_totals(&all);
        let daily = stats::bucket_by_day(&windowed, self.config.stats.display_offset());

        Ok(StatsReport {
            window_days,
            totals,
            windowed_totals: stats::compute_totals(&windowed),
            daily_wins: daily.descending(),
            recent_games: recent_games(&windowed, self.config.stats.recent_games),
            win_rate: WinRate::from_totals(totals),
            leader: current_lead(totals),
            headline: self.build_headline(&all, totals),
        })
    }

    fn build_headline(&self, events: &[crate::domain::WinEvent], totals: Totals) -> Headline {
        let narrative = Narrative::from_events(events, totals, &self.config.stats);
        Headline {
            text: narrative.heading(&self.config.players),
            narrative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Delta, Player};
    use crate::store::MemoryWinStore;
    use chrono::{Duration, TimeZone};

    fn seeded_store(now: DateTime<Utc>) -> Arc<MemoryWinStore> {
        let store = Arc::new(MemoryWinStore::new());
        // Old history outside the 30 day window
        for i in 0..8 {
            store.insert_at(Player::A, Delta::Win, now - Duration::days(60) + Duration::minutes(i)).unwrap();
        }
        store.insert_at(Player::B, Delta::Win, now - Duration::days(2)).unwrap();
        store.insert_at(Player::A, Delta::Win, now - Duration::days(1)).unwrap();
        store.insert_at(Player::A, Delta::Undo, now - Duration::days(1) + Duration::minutes(5)).unwrap();
        store
    }

    #[test]
    fn test_report_on_empty_store() {
        let service = ReportingService::new(Arc::new(MemoryWinStore::new()), AppConfig::new());
        let report = service.stats_report(30, Utc::now()).unwrap();

        assert_eq!(report.totals, Totals::new(0, 0));
        assert!(report.daily_wins.is_empty());
        assert!(report.recent_games.is_empty());
        assert_eq!(report.leader, None);
        assert!(service.trend().unwrap().is_empty());
    }

    #[test]
    fn test_report_separates_window_from_all_time() {
        let now = Utc.with_ymd_and_hms(2026, 9, 30, 12, 0, 0).unwrap();
        let service = ReportingService::new(seeded_store(now), AppConfig::new());

        let report = service.stats_report(30, now).unwrap();

        assert_eq!(report.totals, Totals::new(8, 1));
        assert_eq!(report.windowed_totals, Totals::new(0, 1));
        assert_eq!(report.daily_wins.len(), 2);
        assert!(report.daily_wins[0].date > report.daily_wins[1].date);
        assert_eq!(report.recent_games.len(), 3);
        assert_eq!(report.recent_games[0].delta, Delta::Undo);
        assert_eq!(report.leader, Some(Lead { player: Player::A, margin: 7 }));
        assert_eq!(report.headline.narrative, Narrative::GapWidening { leader: Player::A, gap: 7 });
    }

    #[test]
    fn test_trend_final_point_matches_totals() {
        let now = Utc.with_ymd_and_hms(2026, 9, 30, 12, 0, 0).unwrap();
        let service = ReportingService::new(seeded_store(now), AppConfig::new());

        let trend = service.trend().unwrap();
        let totals = service.totals().unwrap();

        assert_eq!(trend.len(), 11);
        assert_eq!(trend.last().unwrap().totals(), totals);
    }

    #[test]
    fn test_oversized_window_is_clamped() {
        let now = Utc.with_ymd_and_hms(2026, 9, 30, 12, 0, 0).unwrap();
        let service = ReportingService::new(seeded_store(now), AppConfig::new());

        let report = service.stats_report(100_000_000, now).unwrap();

        assert_eq!(report.window_days, stats::MAX_WINDOW_DAYS);
        assert_eq!(report.windowed_totals, Totals::new(8, 1));
    }
}
