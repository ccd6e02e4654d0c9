use std::sync::Arc;

use log::{error, info};

use crate::domain::{Delta, Player, WinEvent};
use crate::errors::PersistenceError;
use crate::live::LiveFeed;
use crate::scoreboard::ScoreboardState;
use crate::store::WinStore;

/// Appends score events and announces them on the live feed
#[derive(Clone)]
pub struct RecordingService {
    store: Arc<dyn WinStore>,
    feed: Arc<LiveFeed>,
}

impl RecordingService {
    pub fn new(store: Arc<dyn WinStore>, feed: Arc<LiveFeed>) -> Self {
        Self { store, feed }
    }

    /// One atomic append. No retries and no deduplication.
    pub fn record(&self, player: Player, delta: Delta) -> Result<WinEvent, PersistenceError> {
        match self.store.insert(player, delta) {
            Ok(event) => {
                info!("Recorded {:+} for player {} (event {})", delta.value(), player, event.id);
                self.feed.publish(&event);
                Ok(event)
            }
            Err(e) => {
                error!("Failed to record {:+} for player {}: {}", delta.value(), player, e);
                Err(e)
            }
        }
    }

    /// Show the delta in `state` right away, then persist it; on failure the
    /// state is put back exactly as it was.
    pub fn record_optimistic(
        &self,
        state: &mut ScoreboardState,
        player: Player,
        delta: Delta,
    ) -> Result<WinEvent, PersistenceError> {
        let pending = state.apply_optimistic(player, delta);
        match self.record(player, delta) {
            Ok(event) => {
                state.confirm(pending, &event);
                Ok(event)
            }
            Err(e) => {
                state.revert(pending);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Totals;
    use crate::store::MemoryWinStore;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    struct RejectingStore;

    impl WinStore for RejectingStore {
        fn insert(&self, _: Player, _: Delta) -> Result<WinEvent, PersistenceError> {
            Err(PersistenceError::Unavailable("offline".to_string()))
        }

        fn query_all(&self) -> Result<Vec<WinEvent>, PersistenceError> {
            Ok(Vec::new())
        }

        fn query_since(&self, _: DateTime<Utc>) -> Result<Vec<WinEvent>, PersistenceError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_record_appends_and_publishes() {
        let store = Arc::new(MemoryWinStore::new());
        let feed = Arc::new(LiveFeed::new());
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&published);
        feed.subscribe(move |event| sink.lock().unwrap().push(event.id));

        let service = RecordingService::new(store.clone(), feed);
        let first = service.record(Player::A, Delta::Win).unwrap();
        let second = service.record(Player::A, Delta::Win).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.query_all().unwrap().len(), 2);
        assert_eq!(*published.lock().unwrap(), vec![first.id, second.id]);
    }

    #[test]
    fn test_failed_write_reverts_optimistic_state_and_publishes_nothing() {
        let feed = Arc::new(LiveFeed::new());
        let notified = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&notified);
        feed.subscribe(move |_| *sink.lock().unwrap() += 1);

        let service = RecordingService::new(Arc::new(RejectingStore), feed);
        let mut state = ScoreboardState::new(Totals::new(3, 3));

        let result = service.record_optimistic(&mut state, Player::B, Delta::Win);

        assert!(matches!(result, Err(PersistenceError::Unavailable(_))));
        assert_eq!(state.totals(), Totals::new(3, 3));
        assert_eq!(*notified.lock().unwrap(), 0);
    }

    #[test]
    fn test_feed_echo_of_own_event_is_counted_once() {
        let store = Arc::new(MemoryWinStore::new());
        let feed = Arc::new(LiveFeed::new());
        let inbox = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&inbox);
        feed.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let service = RecordingService::new(store, feed);
        let mut state = ScoreboardState::default();

        let mine = service.record_optimistic(&mut state, Player::A, Delta::Win).unwrap();
        let theirs = service.record(Player::B, Delta::Win).unwrap();

        let echoes: Vec<WinEvent> = inbox.lock().unwrap().drain(..).collect();
        let folded: Vec<bool> = echoes.iter().map(|event| state.apply_remote(event)).collect();

        assert_eq!(echoes.iter().map(|e| e.id).collect::<Vec<_>>(), vec![mine.id, theirs.id]);
        assert_eq!(folded, vec![false, true]);
        assert_eq!(state.totals(), Totals::new(1, 1));
    }
}
