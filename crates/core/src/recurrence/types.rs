//! Recurrence rule data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::{AccountId, RecurrenceRuleId};

use super::error::RuleError;
use crate::wallet::WalletRef;

/// How often a rule fires within a period.
///
/// Serialized inline into the rule document: the variant becomes the
/// `frequency` field and the anchor day sits beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "camelCase")]
pub enum Schedule {
    /// Every day of the window.
    Daily,
    /// Once per week on a fixed weekday.
    #[serde(rename_all = "camelCase")]
    Weekly {
        /// Weekday the rule fires on, 0 = Sunday through 6 = Saturday.
        day_of_week: u8,
    },
    /// Once per month on a fixed calendar day.
    ///
    /// Days past the end of a short month are clamped to its last day, so
    /// a day-31 rule still fires in February.
    #[serde(rename_all = "camelCase")]
    Monthly {
        /// Calendar day the rule fires on (1-31).
        day_of_month: u32,
    },
}

impl Schedule {
    /// Validates the schedule's anchor day.
    ///
    /// # Errors
    ///
    /// Returns an error if the weekday index or calendar day is out of
    /// range.
    pub fn validate(&self) -> Result<(), RuleError> {
        match *self {
            Self::Daily => Ok(()),
            Self::Weekly { day_of_week } => {
                if day_of_week > 6 {
                    return Err(RuleError::InvalidDayOfWeek(day_of_week));
                }
                Ok(())
            }
            Self::Monthly { day_of_month } => {
                if !(1..=31).contains(&day_of_month) {
                    return Err(RuleError::InvalidDayOfMonth(day_of_month));
                }
                Ok(())
            }
        }
    }
}

/// A repeating obligation owned by an account.
///
/// Rules are period-independent: the same rule is expanded against each
/// period's window in turn. The wallet reference is loose on purpose, so a
/// rule keeps working after a rollover replaces every wallet id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    /// Unique identifier.
    pub id: RecurrenceRuleId,
    /// Account this rule belongs to.
    pub account_id: AccountId,
    /// Target wallet for generated entries.
    #[serde(default)]
    pub wallet_reference: WalletRef,
    /// Human-readable description (e.g., "Phone bill").
    pub description: String,
    /// Amount of each generated entry. Must be positive.
    pub amount: Decimal,
    /// Spending category copied onto generated entries.
    #[serde(default)]
    pub category: Option<String>,
    /// Tags copied onto generated entries.
    #[serde(default)]
    pub tags: Vec<String>,
    /// No occurrence falls before this date.
    pub start_date: NaiveDate,
    /// When and how often the rule fires.
    #[serde(flatten)]
    pub schedule: Schedule,
    /// Inactive rules are kept but never expanded.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RecurrenceRule {
    /// Creates an active rule with no category or tags.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        description: String,
        amount: Decimal,
        schedule: Schedule,
        start_date: NaiveDate,
        wallet_reference: WalletRef,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecurrenceRuleId::new(),
            account_id,
            wallet_reference,
            description,
            amount,
            category: None,
            tags: Vec::new(),
            start_date,
            schedule,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates the rule's amount and schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the schedule's
    /// anchor day is out of range.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.amount <= Decimal::ZERO {
            return Err(RuleError::NonPositiveAmount(self.amount));
        }
        self.schedule.validate()
    }
}
