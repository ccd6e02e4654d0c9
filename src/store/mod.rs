//! Event store boundary. The aggregation code only ever sees `WinEvent`s
//! returned from here; it never talks to SQLite directly.

mod memory;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::domain::{Delta, Player, WinEvent};
use crate::errors::PersistenceError;

pub use memory::MemoryWinStore;
pub use sqlite::SqliteWinStore;

/// Append-only store of score events
pub trait WinStore: Send + Sync {
    /// Append one event; id and timestamp are assigned by the store
    fn insert(&self, player: Player, delta: Delta) -> Result<WinEvent, PersistenceError>;

    /// Every event, oldest first
    fn query_all(&self) -> Result<Vec<WinEvent>, PersistenceError>;

    /// Events created at or after `since`, oldest first
    fn query_since(&self, since: DateTime<Utc>) -> Result<Vec<WinEvent>, PersistenceError>;
}
