use serde::{Deserialize, Serialize};

use super::types::Totals;
use crate::config::settings::{PlayerSettings, StatsSettings};
use crate::domain::{sort_chronologically, Player, WinEvent};

/// Why the heading fell back to the neutral text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackReason {
    Tied,
    NotEnoughWins,
    /// Neither player reached the momentum threshold
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Narrative {
    CloseBattle { leader: Player, gap: i64 },
    GapWidening { leader: Player, gap: i64 },
    GapTightening { trailer: Player, gap: i64 },
    Default { reason: FallbackReason },
}

/// Players of the most recent real wins, newest first, at most `limit`.
/// Undos are skipped entirely.
pub fn recent_real_wins(events: &[WinEvent], limit: usize) -> Vec<Player> {
    let mut ordered = events.to_vec();
    sort_chronologically(&mut ordered);

    ordered
        .iter()
        .rev()
        .filter(|event| event.is_real_win())
        .take(limit)
        .map(|event| event.player)
        .collect()
}

/// Classify the state of the rivalry.
///
/// Checks run in order: tie, close battle, sample size, then momentum of
/// the leader and of the trailer over the last `momentum_window` real wins.
pub fn classify(totals: Totals, recent_wins: &[Player], settings: &StatsSettings) -> Narrative {
    let Some(leader) = totals.leader() else {
        return Narrative::Default { reason: FallbackReason::Tied };
    };
    let gap = totals.gap();

    if gap <= settings.close_battle_margin {
        return Narrative::CloseBattle { leader, gap };
    }

    if recent_wins.len() < settings.momentum_window {
        return Narrative::Default { reason: FallbackReason::NotEnoughWins };
    }

    let window = &recent_wins[..settings.momentum_window];
    let trailer = leader.opponent();

    if count_wins(window, leader) >= settings.momentum_threshold {
        Narrative::GapWidening { leader, gap }
    } else if count_wins(window, trailer) >= settings.momentum_threshold {
        Narrative::GapTightening { trailer, gap }
    } else {
        Narrative::Default { reason: FallbackReason::Unresolved }
    }
}

fn count_wins(window: &[Player], player: Player) -> usize {
    window.iter().filter(|&&p| p == player).count()
}

impl Narrative {
    pub fn from_events(events: &[WinEvent], totals: Totals, settings: &StatsSettings) -> Self {
        let recent = recent_real_wins(events, settings.momentum_window);
        classify(totals, &recent, settings)
    }

    pub fn heading(&self, names: &PlayerSettings) -> String {
        match *self {
            Narrative::CloseBattle { leader, gap } => format!(
                "Neck and neck: {} edges ahead by {}",
                names.name(leader),
                gap
            ),
            Narrative::GapWidening { leader, gap } => format!(
                "{} is pulling away, {} clear and still winning",
                names.name(leader),
                gap
            ),
            Narrative::GapTightening { trailer, gap } => format!(
                "{} is fighting back, {} behind and closing",
                names.name(trailer),
                gap
            ),
            Narrative::Default { .. } => {
                format!("{} vs {}", names.name(Player::A), names.name(Player::B))
            }
        }
    }
}
