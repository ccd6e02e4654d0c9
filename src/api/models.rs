use serde::{Deserialize, Serialize};

use crate::domain::Player;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWinRequest {
    pub player: Player,
    /// Validated into a `Delta` by the handler so the error can name the value
    pub delta: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}
