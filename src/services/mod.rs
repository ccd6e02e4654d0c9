pub mod recording;
pub mod reporting;
pub mod server;

pub use recording::RecordingService;
pub use reporting::{Headline, ReportingService, StatsReport};
pub use server::ServerService;
