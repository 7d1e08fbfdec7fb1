//! Request types for the payroll API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints, and their conversion into the engine's input types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AdjustmentKind, EmployeeId, NewAdjustment, NewEmployee, NewWorkHours, PayPeriod};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// The employee's full name.
    pub full_name: String,
    /// The employee's role or job title.
    pub role_title: String,
    /// The hourly rate.
    pub hourly_rate: Decimal,
    /// The date the employee started.
    pub start_date: NaiveDate,
}

/// Request body for `POST /work-hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkHoursRequest {
    /// The employee who worked.
    pub employee_id: EmployeeId,
    /// The date worked.
    pub work_date: NaiveDate,
    /// Hours worked.
    pub hours: Decimal,
    /// Optional note.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for `POST /adjustments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    /// The employee the adjustment applies to.
    pub employee_id: EmployeeId,
    /// The adjustment date.
    pub adjustment_date: NaiveDate,
    /// `bonus` or `deduction`.
    pub adjustment_type: AdjustmentKind,
    /// The amount.
    pub amount: Decimal,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Query string carrying an inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// The start date (inclusive).
    pub start_date: NaiveDate,
    /// The end date (inclusive).
    pub end_date: NaiveDate,
}

impl PeriodQuery {
    /// Converts into a validated pay period.
    pub fn into_period(self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.start_date, self.end_date)
    }
}

/// Query string for resolving an employee by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameQuery {
    /// The full name to look up.
    pub full_name: String,
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(req: EmployeeRequest) -> Self {
        NewEmployee {
            full_name: req.full_name,
            role_title: req.role_title,
            hourly_rate: req.hourly_rate,
            start_date: req.start_date,
        }
    }
}

impl From<WorkHoursRequest> for NewWorkHours {
    fn from(req: WorkHoursRequest) -> Self {
        NewWorkHours {
            employee_id: req.employee_id,
            work_date: req.work_date,
            hours: req.hours,
            notes: req.notes,
        }
    }
}

impl From<AdjustmentRequest> for NewAdjustment {
    fn from(req: AdjustmentRequest) -> Self {
        NewAdjustment {
            employee_id: req.employee_id,
            adjustment_date: req.adjustment_date,
            kind: req.adjustment_type,
            amount: req.amount,
            description: req.description,
        }
    }
}
