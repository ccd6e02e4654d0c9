pub mod settings;

pub use settings::{AppConfig, PlayerSettings, StatsSettings, StorageSettings};
