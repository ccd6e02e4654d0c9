use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};

use crate::domain::Player;
use crate::errors::config_context;
use crate::stats::MAX_WINDOW_DAYS;

#[derive(Debug, Clone)]
pub struct PlayerSettings {
    pub a_name: String,
    pub b_name: String,
}

impl PlayerSettings {
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::A => &self.a_name,
            Player::B => &self.b_name,
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            a_name: "Usama".to_string(),
            b_name: "Nicholas".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatsSettings {
    pub history_days: i64,
    pub recent_games: usize,
    pub close_battle_margin: i64,
    pub momentum_window: usize,
    pub momentum_threshold: usize,
    /// Calendar days are cut in this offset from UTC
    pub display_offset_minutes: i32,
}

impl StatsSettings {
    pub fn display_offset(&self) -> FixedOffset {
        offset_from_minutes(self.display_offset_minutes).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            history_days: crate::stats::DEFAULT_WINDOW_DAYS,
            recent_games: 10,
            close_battle_margin: 3,
            momentum_window: 5,
            momentum_threshold: 3,
            display_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub feed_log_inserts: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: "foosball_scoreboard.db".to_string(),
            feed_log_inserts: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub players: PlayerSettings,
    pub stats: StatsSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            players: PlayerSettings::default(),
            stats: StatsSettings::default(),
            storage: StorageSettings::default(),
        }
    }

    /// Defaults overlaid with whatever the environment sets
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(path) = lookup("DATABASE_PATH") {
            config.storage.database_path = path;
        }
        if let Some(name) = lookup("PLAYER_A_NAME") {
            config.players.a_name = name;
        }
        if let Some(name) = lookup("PLAYER_B_NAME") {
            config.players.b_name = name;
        }
        if let Some(minutes) = parse_var(&lookup, "DISPLAY_UTC_OFFSET_MINUTES")? {
            anyhow::ensure!(
                offset_from_minutes(minutes).is_some(),
                "DISPLAY_UTC_OFFSET_MINUTES out of range: {}",
                minutes
            );
            config.stats.display_offset_minutes = minutes;
        }
        if let Some(days) = parse_var(&lookup, "HISTORY_DAYS")? {
            anyhow::ensure!(
                (1..=MAX_WINDOW_DAYS).contains(&days),
                "HISTORY_DAYS must be between 1 and {}, got {}",
                MAX_WINDOW_DAYS,
                days
            );
            config.stats.history_days = days;
        }

        Ok(config)
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| raw.trim().parse::<T>())
        .transpose()
        .with_context(|| config_context(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.stats.history_days, 30);
        assert_eq!(config.players.name(Player::A), "Usama");
        assert_eq!(config.players.name(Player::B), "Nicholas");
        assert_eq!(config.stats.display_offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_PATH", "/tmp/scores.db"),
            ("PLAYER_B_NAME", "Nick"),
            ("DISPLAY_UTC_OFFSET_MINUTES", "-300"),
            ("HISTORY_DAYS", "7"),
        ]))
        .unwrap();

        assert_eq!(config.storage.database_path, "/tmp/scores.db");
        assert_eq!(config.players.name(Player::B), "Nick");
        assert_eq!(config.stats.display_offset().local_minus_utc(), -300 * 60);
        assert_eq!(config.stats.history_days, 7);
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[("HISTORY_DAYS", "soon")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("HISTORY_DAYS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("HISTORY_DAYS", "100000000")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("DISPLAY_UTC_OFFSET_MINUTES", "99999")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("DISPLAY_UTC_OFFSET_MINUTES", "100000000")])).is_err());
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let stats = StatsSettings {
            display_offset_minutes: i32::MAX,
            ..StatsSettings::default()
        };
        assert_eq!(stats.display_offset().local_minus_utc(), 0);
    }
}
