use thiserror::Error;

/// Rejected match configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported match duration: {0}s (allowed: 30, 60, 90, 120, 180, 240)")]
    UnsupportedDuration(u64),

    #[error("match duration must be greater than zero")]
    ZeroDuration,

    #[error("score ceiling must be at least 1 point")]
    ZeroCeiling,
}

/// Penalty counts above what the rules allow.
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "penalty counts out of range: chui {chui_level}, hansoku-chui {hansoku_chui}, hansoku {hansoku}"
)]
pub struct PenaltyRangeError {
    pub chui_level: u8,
    pub hansoku_chui: u8,
    pub hansoku: u8,
}

/// The driver task is gone (shut down or panicked).
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("match driver is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("event sink is closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}
