use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::WinStore;
use crate::domain::{sort_chronologically, Delta, Player, WinEvent, WinId};
use crate::errors::PersistenceError;

/// Process-local store, handy for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryWinStore {
    events: Mutex<Vec<WinEvent>>,
}

impl MemoryWinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append with an explicit timestamp instead of the wall clock
    pub fn insert_at(
        &self,
        player: Player,
        delta: Delta,
        created_at: DateTime<Utc>,
    ) -> Result<WinEvent, PersistenceError> {
        let mut events = self.lock()?;
        let id = next_id(&events);
        let event = WinEvent::new(id, player, delta, created_at);
        events.push(event.clone());
        Ok(event)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<WinEvent>>, PersistenceError> {
        self.events
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn sorted(&self, keep: impl Fn(&WinEvent) -> bool) -> Result<Vec<WinEvent>, PersistenceError> {
        let mut events: Vec<WinEvent> = self.lock()?.iter().filter(|e| keep(e)).cloned().collect();
        sort_chronologically(&mut events);
        Ok(events)
    }
}

fn next_id(events: &[WinEvent]) -> WinId {
    events.iter().map(|e| e.id).max().unwrap_or(0) + 1
}

impl WinStore for MemoryWinStore {
    fn insert(&self, player: Player, delta: Delta) -> Result<WinEvent, PersistenceError> {
        self.insert_at(player, delta, Utc::now())
    }

    fn query_all(&self) -> Result<Vec<WinEvent>, PersistenceError> {
        self.sorted(|_| true)
    }

    fn query_since(&self, since: DateTime<Utc>) -> Result<Vec<WinEvent>, PersistenceError> {
        self.sorted(|e| e.created_at >= since)
    }
}
