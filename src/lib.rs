pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod live;
pub mod output;
pub mod scoreboard;
pub mod services;
pub mod stats;
pub mod store;

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::{Delta, Player};
use crate::errors::with_store_context;
use crate::live::LiveFeed;
use crate::scoreboard::ScoreboardState;
use crate::services::{RecordingService, ReportingService, ServerService};
use crate::store::{SqliteWinStore, WinStore};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?;
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_record(player: Player, undo: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let store: Arc<dyn WinStore> = Arc::new(SqliteWinStore::open(&config.storage.database_path)?);

    let history = with_store_context(store.query_all(), "load history")?;
    let mut state = ScoreboardState::from_events(&history);

    let delta = if undo { Delta::Undo } else { Delta::Win };
    let service = RecordingService::new(store, Arc::new(LiveFeed::new()));
    let event = with_store_context(service.record_optimistic(&mut state, player, delta), "record win")?;

    output::print_recorded(&config.players, &event, state.totals());
    Ok(())
}

pub fn handle_stats(days: Option<i64>) -> Result<()> {
    let config = AppConfig::from_env()?;
    let days = days.unwrap_or(config.stats.history_days);
    anyhow::ensure!(days > 0, "--days must be positive, got {}", days);
    if days > stats::MAX_WINDOW_DAYS {
        log::warn!("--days {} exceeds {}, using the maximum", days, stats::MAX_WINDOW_DAYS);
    }

    let service = open_reporting(config)?;
    let report = with_store_context(service.stats_report(days, Utc::now()), "build stats")?;

    output::print_report(&service.config().players, &report);
    Ok(())
}

pub fn handle_trend() -> Result<()> {
    let config = AppConfig::from_env()?;
    let service = open_reporting(config)?;
    let trend = with_store_context(service.trend(), "build trend")?;

    output::print_trend(&service.config().players, &trend);
    Ok(())
}

pub fn handle_init_db() -> Result<()> {
    let config = AppConfig::from_env()?;
    let store = SqliteWinStore::open(&config.storage.database_path)?;
    let mut conn = database::get_connection(store.pool())?;
    database::setup::reset_database(&mut conn)?;
    log::info!("Initialised empty event store at {}", config.storage.database_path);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn open_reporting(config: AppConfig) -> Result<ReportingService> {
    let store: Arc<dyn WinStore> = Arc::new(SqliteWinStore::open(&config.storage.database_path)?);
    Ok(ReportingService::new(store, config))
}
