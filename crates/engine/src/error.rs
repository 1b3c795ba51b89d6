//! Engine error types.

use chrono::NaiveDate;
use thiserror::Error;

use moneta_shared::types::{PeriodId, WalletId};

use crate::store::StoreError;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    // ========== Lookup Errors ==========
    /// Period not found in the store.
    #[error("Period not found: {0}")]
    PeriodNotFound(PeriodId),

    /// Wallet not found in the store.
    #[error("Wallet not found: {0}")]
    WalletNotFound(WalletId),

    // ========== Validation Errors ==========
    /// Target period is closed; closed periods are immutable.
    #[error("Period {0} is closed")]
    PeriodClosed(PeriodId),

    /// Period document carries an inverted date window.
    #[error("Period {period_id} has an invalid window: start {start} is after end {end}")]
    InvalidPeriodWindow {
        /// The malformed period.
        period_id: PeriodId,
        /// Stored start date.
        start: NaiveDate,
        /// Stored end date.
        end: NaiveDate,
    },

    /// Migration source and destination must be different periods.
    #[error("Cannot migrate period {0} into itself")]
    SamePeriod(PeriodId),

    /// Migration source and destination must belong to the same account.
    // A field literally named `source` would become the thiserror cause.
    #[error("Periods {source_period} and {dest_period} belong to different accounts")]
    AccountMismatch {
        /// Source period.
        source_period: PeriodId,
        /// Destination period.
        dest_period: PeriodId,
    },

    // ========== Resolution Errors ==========
    /// No wallet could be resolved in the period, even after retrying.
    ///
    /// Raised when the period has no default wallet, so loose references
    /// have nothing to fall back to.
    #[error("No wallet could be resolved in period {0}")]
    WalletResolutionFailed(PeriodId),

    // ========== Write Errors ==========
    /// The atomic batch write of generated entries was rejected.
    ///
    /// Nothing from the batch was persisted.
    #[error("Batch write rejected: {0}")]
    BatchWriteFailed(#[source] StoreError),

    // ========== Store Errors ==========
    /// Store read or single-document write failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Returns the error code for reports and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::WalletNotFound(_) => "WALLET_NOT_FOUND",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::InvalidPeriodWindow { .. } => "INVALID_PERIOD_WINDOW",
            Self::SamePeriod(_) => "SAME_PERIOD",
            Self::AccountMismatch { .. } => "ACCOUNT_MISMATCH",
            Self::WalletResolutionFailed(_) => "WALLET_RESOLUTION_FAILED",
            Self::BatchWriteFailed(_) => "BATCH_WRITE_FAILED",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns true if the call was rejected before any write happened.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::PeriodClosed(_)
                | Self::InvalidPeriodWindow { .. }
                | Self::SamePeriod(_)
                | Self::AccountMismatch { .. }
        )
    }

    /// Returns true if retrying the whole operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::WalletResolutionFailed(_) | Self::BatchWriteFailed(_) => true,
            Self::Store(err) => err.is_retryable(),
            _ => false,
        }
    }
}
