//! Payroll report models.
//!
//! This module contains the [`PayrollReport`] type and its rows and totals.
//! Amounts are exact decimals; nothing here rounds for display.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EmployeeId, PayPeriod};
use crate::error::{EngineError, EngineResult};

/// One employee's pay for a period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EmployeeId, PayrollRow};
/// use rust_decimal::Decimal;
///
/// let row = PayrollRow {
///     employee_id: EmployeeId(1),
///     full_name: "Ana Torres".to_string(),
///     hourly_rate: Decimal::from(10),
///     total_hours: Decimal::from(10),
///     gross_pay: Decimal::from(100),
///     bonus_total: Decimal::from(50),
///     deduction_total: Decimal::from(5),
///     net_pay: Decimal::from(145),
/// };
/// assert!(row.has_activity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// The employee this row belongs to.
    pub employee_id: EmployeeId,
    /// The employee's full name.
    pub full_name: String,
    /// The employee's current hourly rate.
    pub hourly_rate: Decimal,
    /// Hours logged within the period.
    pub total_hours: Decimal,
    /// `total_hours * hourly_rate`.
    pub gross_pay: Decimal,
    /// Sum of bonuses within the period.
    pub bonus_total: Decimal,
    /// Sum of deductions within the period.
    pub deduction_total: Decimal,
    /// `gross_pay + bonus_total - deduction_total`.
    pub net_pay: Decimal,
}

impl PayrollRow {
    /// True if the employee logged hours or adjustments in the period.
    pub fn has_activity(&self) -> bool {
        !(self.total_hours.is_zero()
            && self.bonus_total.is_zero()
            && self.deduction_total.is_zero())
    }
}

/// Column sums over every row of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Total hours across all employees.
    pub total_hours: Decimal,
    /// Total gross pay.
    pub gross_pay: Decimal,
    /// Total bonuses.
    pub bonus_total: Decimal,
    /// Total deductions.
    pub deduction_total: Decimal,
    /// Total net pay, the amount to deposit for the period.
    pub net_pay: Decimal,
}

impl PayrollTotals {
    /// Sums the given rows.
    ///
    /// Fails with `Overflow` naming the first column whose sum leaves the
    /// `Decimal` range.
    pub fn from_rows(rows: &[PayrollRow]) -> EngineResult<Self> {
        let add = |total: Decimal, value: Decimal, quantity: &str| {
            total
                .checked_add(value)
                .ok_or_else(|| EngineError::overflow(quantity))
        };
        rows.iter().try_fold(Self::default(), |totals, row| {
            Ok(Self {
                total_hours: add(totals.total_hours, row.total_hours, "total_hours")?,
                gross_pay: add(totals.gross_pay, row.gross_pay, "gross_pay")?,
                bonus_total: add(totals.bonus_total, row.bonus_total, "bonus_total")?,
                deduction_total: add(
                    totals.deduction_total,
                    row.deduction_total,
                    "deduction_total",
                )?,
                net_pay: add(totals.net_pay, row.net_pay, "net_pay")?,
            })
        })
    }
}

/// The complete result of a payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The engine version that produced the report.
    pub engine_version: String,
    /// The period the report covers.
    pub pay_period: PayPeriod,
    /// One row per employee, ordered by full name then id.
    pub rows: Vec<PayrollRow>,
    /// Column sums over `rows`.
    pub totals: PayrollTotals,
}

impl PayrollReport {
    /// True when the roster was empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
