use chrono::{DateTime, Utc};

use crate::domain::{Delta, Player, WinEvent};
use crate::errors::PersistenceError;

/// Raw `wins` row before domain validation
#[derive(Debug, Clone)]
pub struct WinRow {
    pub id: i64,
    pub player: String,
    pub delta: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<WinRow> for WinEvent {
    type Error = PersistenceError;

    fn try_from(row: WinRow) -> Result<Self, Self::Error> {
        let player: Player = row
            .player
            .parse()
            .map_err(|e| PersistenceError::Corrupt(format!("row {}: {}", row.id, e)))?;
        let delta = Delta::try_from(row.delta)
            .map_err(|e| PersistenceError::Corrupt(format!("row {}: {}", row.id, e)))?;

        Ok(WinEvent::new(row.id, player, delta, row.created_at))
    }
}
