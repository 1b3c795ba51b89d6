//! Period data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use moneta_shared::types::{AccountId, PeriodId};

use super::error::PeriodError;
use crate::dates::DateWindow;

/// One budgeting cycle for an account.
///
/// The window is inclusive on both ends. Serialized field names follow the
/// camelCase document shape of the backing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Unique identifier.
    pub id: PeriodId,
    /// Account this period belongs to.
    pub account_id: AccountId,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Whether the period has been closed. Closed periods are immutable.
    pub closed: bool,
    /// When the period was closed, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Period {
    /// Creates an open period covering the given window.
    #[must_use]
    pub fn new(account_id: AccountId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: PeriodId::new(),
            account_id,
            start_date,
            end_date,
            closed: false,
            closed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Returns the period's date window.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored dates are inverted.
    pub fn window(&self) -> Result<DateWindow, PeriodError> {
        DateWindow::new(self.start_date, self.end_date).ok_or(PeriodError::InvalidWindow {
            start: self.start_date,
            end: self.end_date,
        })
    }

    /// Returns true if new entries may be written to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Marks the period closed at the given instant.
    pub fn close(&mut self, at: DateTime<Utc>) {
        self.closed = true;
        self.closed_at = Some(at);
    }
}
