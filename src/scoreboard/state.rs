use std::collections::HashSet;

use log::debug;

use crate::domain::{Delta, Player, WinEvent, WinId};
use crate::stats::{compute_totals, Totals};

/// A delta shown to the user before the store has confirmed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending win must be confirmed or reverted"]
pub struct PendingWin {
    pub player: Player,
    pub delta: Delta,
}

/// Client-side view of the scores.
///
/// Owned by whoever drives the UI and passed around explicitly. Tracks which
/// event ids are already folded in so a locally recorded event that also
/// arrives through the live feed is only counted once.
#[derive(Debug, Clone, Default)]
pub struct ScoreboardState {
    totals: Totals,
    folded: HashSet<WinId>,
}

impl ScoreboardState {
    pub fn new(totals: Totals) -> Self {
        Self {
            totals,
            folded: HashSet::new(),
        }
    }

    /// Seed from a full event list, remembering every id
    pub fn from_events(events: &[WinEvent]) -> Self {
        Self {
            totals: compute_totals(events),
            folded: events.iter().map(|e| e.id).collect(),
        }
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn apply_optimistic(&mut self, player: Player, delta: Delta) -> PendingWin {
        self.totals.add(player, delta.value());
        PendingWin { player, delta }
    }

    /// The store accepted the pending write as `event`
    pub fn confirm(&mut self, pending: PendingWin, event: &WinEvent) {
        if !self.folded.insert(event.id) {
            // The live feed got there first; drop the optimistic copy
            debug!("Event {} already folded in, withdrawing optimistic delta", event.id);
            self.totals.add(pending.player, -pending.delta.value());
        }
    }

    /// The write failed: undo exactly what `apply_optimistic` added
    pub fn revert(&mut self, pending: PendingWin) {
        self.totals.add(pending.player, -pending.delta.value());
    }

    /// Fold in an event announced by the live feed. False if already counted.
    pub fn apply_remote(&mut self, event: &WinEvent) -> bool {
        if !self.folded.insert(event.id) {
            return false;
        }
        self.totals.add(event.player, event.delta.value());
        true
    }
}
