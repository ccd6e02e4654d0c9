use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Player;

/// Net score per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Totals {
    pub a: i64,
    pub b: i64,
}

impl Totals {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    pub fn get(&self, player: Player) -> i64 {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }

    pub fn add(&mut self, player: Player, amount: i64) {
        match player {
            Player::A => self.a += amount,
            Player::B => self.b += amount,
        }
    }

    pub fn gap(&self) -> i64 {
        (self.a - self.b).abs()
    }

    /// None when tied
    pub fn leader(&self) -> Option<Player> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Player::A),
            std::cmp::Ordering::Less => Some(Player::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn combined(&self) -> i64 {
        self.a + self.b
    }
}

/// Per-day totals keyed by calendar date in the display offset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyBreakdown {
    days: BTreeMap<NaiveDate, Totals>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub totals: Totals,
}

impl DailyBreakdown {
    pub(crate) fn add(&mut self, date: NaiveDate, player: Player, amount: i64) {
        self.days.entry(date).or_default().add(player, amount);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Totals> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Newest day first, the order the dashboard lists them in
    pub fn descending(&self) -> Vec<DailyEntry> {
        self.days
            .iter()
            .rev()
            .map(|(date, totals)| DailyEntry { date: *date, totals: *totals })
            .collect()
    }

    /// Sum over every bucket; equals the windowed totals
    pub fn sum(&self) -> Totals {
        self.days.values().fold(Totals::default(), |mut acc, day| {
            acc.a += day.a;
            acc.b += day.b;
            acc
        })
    }
}

/// Both players' running scores right after one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "cumulativeA")]
    pub a: i64,
    #[serde(rename = "cumulativeB")]
    pub b: i64,
}

impl TrendPoint {
    pub fn totals(&self) -> Totals {
        Totals::new(self.a, self.b)
    }
}
