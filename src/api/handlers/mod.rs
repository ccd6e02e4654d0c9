use serde::Deserialize;

use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::live::LiveFeed;
use crate::services::{RecordingService, ReportingService};

pub mod live;
pub mod stats;
pub mod wins;

pub struct AppState {
    pub recording: RecordingService,
    pub reporting: ReportingService,
    pub feed: Arc<LiveFeed>,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct StatsParams {
    pub days: Option<i64>,
}
