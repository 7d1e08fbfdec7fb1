//! Employee model and its creation input.
//!
//! This module defines the [`Employee`] record, its [`EmployeeId`] and the
//! [`NewEmployee`] input used to register a worker.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::validation::{require_non_negative, require_storable_date, require_text};

/// Identifier of an employee, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a registered employee.
///
/// The hourly rate is always the current rate; there is no rate history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The employee's full name.
    pub full_name: String,
    /// The employee's role or job title.
    pub role_title: String,
    /// The hourly rate paid to the employee.
    pub hourly_rate: Decimal,
    /// The date the employee started.
    pub start_date: NaiveDate,
}

/// Input for registering a new employee.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::NewEmployee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let new_employee = NewEmployee {
///     full_name: "Ana Torres".to_string(),
///     role_title: "Cashier".to_string(),
///     hourly_rate: Decimal::new(1550, 2),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
/// };
/// assert!(new_employee.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// The employee's full name (must not be empty).
    pub full_name: String,
    /// The employee's role or job title (must not be empty).
    pub role_title: String,
    /// The hourly rate (must not be negative).
    pub hourly_rate: Decimal,
    /// The date the employee started.
    pub start_date: NaiveDate,
}

impl NewEmployee {
    /// Checks required text, the non-negative hourly rate and the start date.
    pub fn validate(&self) -> EngineResult<()> {
        require_text("full_name", &self.full_name)?;
        require_text("role_title", &self.role_title)?;
        require_non_negative("hourly_rate", self.hourly_rate)?;
        require_storable_date("start_date", self.start_date)?;
        Ok(())
    }

    /// Builds the stored record once an id has been assigned.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            full_name: self.full_name,
            role_title: self.role_title,
            hourly_rate: self.hourly_rate,
            start_date: self.start_date,
        }
    }
}
