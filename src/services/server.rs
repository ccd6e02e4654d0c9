use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use log::info;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::live::LiveFeed;
use crate::services::{RecordingService, ReportingService};
use crate::store::{SqliteWinStore, WinStore};

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let store: Arc<dyn WinStore> = Arc::new(SqliteWinStore::open(&self.config.storage.database_path)?);
        info!("Using event store at {}", self.config.storage.database_path);

        let feed = Arc::new(LiveFeed::new());
        if self.config.storage.feed_log_inserts {
            feed.subscribe(|event| {
                info!("Live update: player {} {:+}", event.player, event.delta.value());
            });
        }

        let state = Arc::new(build_state(store, feed, self.config.clone()));
        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

pub fn build_state(store: Arc<dyn WinStore>, feed: Arc<LiveFeed>, config: AppConfig) -> AppState {
    AppState {
        recording: RecordingService::new(Arc::clone(&store), Arc::clone(&feed)),
        reporting: ReportingService::new(store, config.clone()),
        feed,
        config,
    }
}
