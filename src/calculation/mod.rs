//! Calculation logic for the payroll engine.
//!
//! This module contains the aggregation of work hours and adjustments per
//! employee within a pay period, and the payroll calculation that joins
//! those sums with the roster to derive gross and net pay.

mod aggregation;
mod payroll;

pub use aggregation::{
    EmployeeAggregate, PeriodAggregates, aggregate_period, sum_adjustments_by_employee,
    sum_hours_by_employee,
};
pub use payroll::{build_payroll_report, calculate_payroll, compute_row};
