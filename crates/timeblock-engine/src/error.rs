//! Error types for timeblock-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A date and time-of-day pair does not name a valid instant.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// An in-day block crosses more calendar days than the in-day model supports.
    #[error("Unexpected time event duration: block {id} spans {days} calendar days")]
    UnsupportedDuration { id: String, days: i64 },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
