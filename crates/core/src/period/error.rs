//! Period error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors for structurally invalid periods.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// Period start date is after its end date.
    #[error("Period start {start} is after end {end}")]
    InvalidWindow {
        /// Configured start date.
        start: NaiveDate,
        /// Configured end date.
        end: NaiveDate,
    },
}

impl PeriodError {
    /// Returns the error code for reports and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidWindow { .. } => "INVALID_WINDOW",
        }
    }
}
