//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustment;
mod employee;
mod pay_period;
mod payroll_report;
mod work_hours;

pub use adjustment::{AdjustmentEntry, AdjustmentKind, NewAdjustment};
pub use employee::{Employee, EmployeeId, NewEmployee};
pub use pay_period::PayPeriod;
pub use payroll_report::{PayrollReport, PayrollRow, PayrollTotals};
pub use work_hours::{NewWorkHours, WorkHourEntry};

/// Identifier assigned to work-hour and adjustment entries.
pub type RecordId = i64;
