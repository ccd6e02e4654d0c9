use super::types::Totals;
use crate::domain::WinEvent;

/// Sum of deltas per player. Order does not matter; empty input is all zeros.
pub fn compute_totals(events: &[WinEvent]) -> Totals {
    events.iter().fold(Totals::default(), |mut totals, event| {
        totals.add(event.player, event.delta.value());
        totals
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Delta, Player};
    use chrono::{TimeZone, Utc};

    fn event(id: i64, player: Player, delta: Delta) -> WinEvent {
        WinEvent::new(id, player, delta, Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap())
    }

    #[test]
    fn test_empty_sequence_gives_zero_totals() {
        assert_eq!(compute_totals(&[]), Totals::new(0, 0));
    }

    #[test]
    fn test_wins_and_undos_net_out() {
        let events = vec![
            event(1, Player::A, Delta::Win),
            event(2, Player::B, Delta::Win),
            event(3, Player::A, Delta::Win),
            event(4, Player::A, Delta::Undo),
        ];

        assert_eq!(compute_totals(&events), Totals::new(1, 1));
    }

    #[test]
    fn test_order_independent() {
        let mut events = vec![
            event(1, Player::B, Delta::Win),
            event(2, Player::B, Delta::Undo),
            event(3, Player::A, Delta::Win),
            event(4, Player::B, Delta::Win),
        ];
        let forward = compute_totals(&events);
        events.reverse();

        assert_eq!(compute_totals(&events), forward);
        assert_eq!(forward, Totals::new(1, 1));
    }

    #[test]
    fn test_totals_can_go_negative() {
        let events = vec![event(1, Player::B, Delta::Undo)];
        let totals = compute_totals(&events);
        assert_eq!(totals.get(Player::B), -1);
        assert_eq!(totals.leader(), Some(Player::A));
    }
}
