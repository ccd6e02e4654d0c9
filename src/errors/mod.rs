use thiserror::Error;

/// Invalid values arriving from the outside world (CLI, HTTP bodies, stored rows)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown player: {0:?} (expected \"a\" or \"b\")")]
    UnknownPlayer(String),
    #[error("invalid delta {0}: only +1 (win) and -1 (undo) are allowed")]
    InvalidDelta(i64),
}

/// Failure talking to the event store. Never retried; callers roll back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("event store unavailable: {0}")]
    Unavailable(String),
    #[error("event store rejected {operation}: {source}")]
    Rejected {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("stored row could not be decoded: {0}")]
    Corrupt(String),
}

impl From<r2d2::Error> for PersistenceError {
    fn from(err: r2d2::Error) -> Self {
        PersistenceError::Unavailable(err.to_string())
    }
}

/// Add context to store errors
pub fn store_context(operation: &str) -> String {
    format!("Failed to {} in event store", operation)
}

/// Add context to config errors
pub fn config_context(key: &str) -> String {
    format!("Failed to read configuration value: {}", key)
}

/// Wrap result with store context
pub fn with_store_context<T, E>(result: Result<T, E>, operation: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    use anyhow::Context as _;
    result.context(store_context(operation))
}
