use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::Totals;
use crate::domain::{sort_chronologically, Delta, Player, WinEvent, WinId};

/// Share of the combined score per player, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinRate {
    pub a: f64,
    pub b: f64,
    pub total_games: i64,
}

impl WinRate {
    /// Even split when nothing positive has been recorded yet
    pub fn from_totals(totals: Totals) -> Self {
        let total_games = totals.combined();
        if total_games <= 0 {
            return Self { a: 50.0, b: 50.0, total_games };
        }

        let total = total_games as f64;
        Self {
            a: totals.a as f64 / total * 100.0,
            b: totals.b as f64 / total * 100.0,
            total_games,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lead {
    pub player: Player,
    pub margin: i64,
}

pub fn current_lead(totals: Totals) -> Option<Lead> {
    totals.leader().map(|player| Lead {
        player,
        margin: totals.gap(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentGame {
    pub id: WinId,
    pub player: Player,
    pub delta: Delta,
    pub label: &'static str,
    pub created_at: DateTime<Utc>,
}

/// Newest `limit` events, newest first
pub fn recent_games(events: &[WinEvent], limit: usize) -> Vec<RecentGame> {
    let mut ordered = events.to_vec();
    sort_chronologically(&mut ordered);

    ordered
        .into_iter()
        .rev()
        .take(limit)
        .map(|event| RecentGame {
            id: event.id,
            player: event.player,
            delta: event.delta,
            label: event.delta.label(),
            created_at: event.created_at,
        })
        .collect()
}
