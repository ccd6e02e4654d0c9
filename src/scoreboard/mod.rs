mod state;

pub use state::{PendingWin, ScoreboardState};
