use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub type WinId = i64;

/// One of the two tracked players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    A,
    B,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::A => "a",
            Player::B => "b",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Player {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(Player::A),
            "b" => Ok(Player::B),
            other => Err(DomainError::UnknownPlayer(other.to_string())),
        }
    }
}

/// Score change carried by an event: a recorded win or the undo of one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Delta {
    Win,
    Undo,
}

impl Delta {
    pub fn value(self) -> i64 {
        match self {
            Delta::Win => 1,
            Delta::Undo => -1,
        }
    }

    pub fn is_win(self) -> bool {
        matches!(self, Delta::Win)
    }

    pub fn label(self) -> &'static str {
        match self {
            Delta::Win => "Won a game",
            Delta::Undo => "Undo",
        }
    }
}

impl From<Delta> for i64 {
    fn from(delta: Delta) -> Self {
        delta.value()
    }
}

impl TryFrom<i64> for Delta {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Delta::Win),
            -1 => Ok(Delta::Undo),
            other => Err(DomainError::InvalidDelta(other)),
        }
    }
}

/// Immutable, append-only score event as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinEvent {
    pub id: WinId,
    pub player: Player,
    pub delta: Delta,
    pub created_at: DateTime<Utc>,
}

impl WinEvent {
    pub fn new(id: WinId, player: Player, delta: Delta, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            player,
            delta,
            created_at,
        }
    }

    /// Positive-delta events only; undos are not wins
    pub fn is_real_win(&self) -> bool {
        self.delta.is_win()
    }
}

/// Chronological order used everywhere: timestamp first, store id breaks ties
pub fn sort_chronologically(events: &mut [WinEvent]) {
    events.sort_by(|x, y| x.created_at.cmp(&y.created_at).then(x.id.cmp(&y.id)));
}
