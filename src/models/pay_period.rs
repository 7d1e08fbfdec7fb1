//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: the caller-supplied inclusive
//! date range over which entries are read and payroll is computed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::validation::require_storable_date;

/// An inclusive date range.
///
/// A period built with [`PayPeriod::new`] always has `start_date <= end_date`.
/// Periods that arrive through deserialization are re-checked with
/// [`PayPeriod::validate`] before any read or calculation uses them.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
/// )
/// .unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert_eq!(period.days(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, rejecting a start date after the end date.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::error::EngineError;
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let reversed = PayPeriod::new(
    ///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    /// );
    /// assert!(matches!(reversed, Err(EngineError::InvalidRange { .. })));
    /// ```
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Fails with `InvalidRange` when the start falls after the end, and
    /// with `Validation` when either end lies outside the storable years.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::InvalidRange {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        require_storable_date("start_date", self.start_date)?;
        require_storable_date("end_date", self.end_date)
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
