use anyhow::Result;
use chrono::{DateTime, Utc};

use super::WinStore;
use crate::database::{self, DbPool};
use crate::domain::{Delta, Player, WinEvent};
use crate::errors::PersistenceError;

pub struct SqliteWinStore {
    pool: DbPool,
}

impl SqliteWinStore {
    /// Wrap an existing pool, creating the schema if it is missing
    pub fn new(pool: DbPool) -> Result<Self> {
        let mut conn = database::get_connection(&pool)?;
        database::setup::ensure_schema(&mut conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    pub fn open(database_path: &str) -> Result<Self> {
        Self::new(database::create_pool(database_path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(database::create_memory_pool()?)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl WinStore for SqliteWinStore {
    fn insert(&self, player: Player, delta: Delta) -> Result<WinEvent, PersistenceError> {
        let mut conn = database::get_connection(&self.pool)?;
        database::wins::insert_win(&mut conn, player, delta)
    }

    fn query_all(&self) -> Result<Vec<WinEvent>, PersistenceError> {
        let mut conn = database::get_connection(&self.pool)?;
        database::wins::list_all(&mut conn)
    }

    fn query_since(&self, since: DateTime<Utc>) -> Result<Vec<WinEvent>, PersistenceError> {
        let mut conn = database::get_connection(&self.pool)?;
        database::wins::list_since(&mut conn, since)
    }
}
