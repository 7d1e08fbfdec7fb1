//! Per-employee aggregation of hours and adjustments.
//!
//! Hours, bonuses and deductions are summed as three independent group-by
//! passes. Bonuses and deductions come from the same collection but are
//! mutually exclusive kinds, so each is its own aggregation.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentEntry, AdjustmentKind, EmployeeId, PayPeriod, WorkHourEntry};

/// Sums of one employee's activity within a period.
///
/// The default is all zeros, which is what an employee with no entries gets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeAggregate {
    /// Hours logged in the period.
    pub total_hours: Decimal,
    /// Bonuses dated in the period.
    pub bonus_total: Decimal,
    /// Deductions dated in the period.
    pub deduction_total: Decimal,
}

/// The three per-employee sums for a period.
///
/// Employees without entries have no key in any map; [`for_employee`]
/// fills them in with zeros, so callers get left join semantics.
///
/// [`for_employee`]: PeriodAggregates::for_employee
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodAggregates {
    /// Hours per employee.
    pub hours: HashMap<EmployeeId, Decimal>,
    /// Bonus totals per employee.
    pub bonuses: HashMap<EmployeeId, Decimal>,
    /// Deduction totals per employee.
    pub deductions: HashMap<EmployeeId, Decimal>,
}

impl PeriodAggregates {
    /// The sums for one employee, zero for anything missing.
    pub fn for_employee(&self, id: EmployeeId) -> EmployeeAggregate {
        let lookup =
            |map: &HashMap<EmployeeId, Decimal>| map.get(&id).copied().unwrap_or_default();
        EmployeeAggregate {
            total_hours: lookup(&self.hours),
            bonus_total: lookup(&self.bonuses),
            deduction_total: lookup(&self.deductions),
        }
    }
}

/// Sums hours per employee over entries dated within the period.
///
/// Entries outside the period are skipped even if supplied. Values are added
/// exactly as given.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::sum_hours_by_employee;
/// use payroll_engine::models::{EmployeeId, PayPeriod, WorkHourEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = |d: u32| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
/// let entry = |id: i64, d: u32, h: i64| WorkHourEntry {
///     id,
///     employee_id: EmployeeId(1),
///     work_date: day(d),
///     hours: Decimal::from(h),
///     notes: None,
/// };
///
/// let period = PayPeriod::new(day(1), day(2)).unwrap();
/// let sums =
///     sum_hours_by_employee(&[entry(1, 1, 8), entry(2, 2, 2), entry(3, 3, 5)], &period).unwrap();
/// assert_eq!(sums[&EmployeeId(1)], Decimal::from(10));
/// ```
pub fn sum_hours_by_employee(
    entries: &[WorkHourEntry],
    period: &PayPeriod,
) -> EngineResult<HashMap<EmployeeId, Decimal>> {
    let mut sums: HashMap<EmployeeId, Decimal> = HashMap::new();
    for entry in entries
        .iter()
        .filter(|e| period.contains_date(e.work_date))
    {
        add_to(&mut sums, entry.employee_id, entry.hours, "total_hours")?;
    }
    Ok(sums)
}

/// Sums adjustment amounts of one kind per employee within the period.
pub fn sum_adjustments_by_employee(
    entries: &[AdjustmentEntry],
    kind: AdjustmentKind,
    period: &PayPeriod,
) -> EngineResult<HashMap<EmployeeId, Decimal>> {
    let quantity = match kind {
        AdjustmentKind::Bonus => "bonus_total",
        AdjustmentKind::Deduction => "deduction_total",
    };
    let mut sums: HashMap<EmployeeId, Decimal> = HashMap::new();
    for entry in entries
        .iter()
        .filter(|e| e.kind == kind && period.contains_date(e.adjustment_date))
    {
        add_to(&mut sums, entry.employee_id, entry.amount, quantity)?;
    }
    Ok(sums)
}

fn add_to(
    sums: &mut HashMap<EmployeeId, Decimal>,
    id: EmployeeId,
    value: Decimal,
    quantity: &str,
) -> EngineResult<()> {
    let sum = sums.entry(id).or_default();
    *sum = sum
        .checked_add(value)
        .ok_or_else(|| EngineError::overflow(quantity))?;
    Ok(())
}

/// Runs the hours, bonus and deduction aggregations for a period.
///
/// # Errors
///
/// Returns `Overflow` if any per-employee sum exceeds the `Decimal` range.
pub fn aggregate_period(
    work_hours: &[WorkHourEntry],
    adjustments: &[AdjustmentEntry],
    period: &PayPeriod,
) -> EngineResult<PeriodAggregates> {
    Ok(PeriodAggregates {
        hours: sum_hours_by_employee(work_hours, period)?,
        bonuses: sum_adjustments_by_employee(adjustments, AdjustmentKind::Bonus, period)?,
        deductions: sum_adjustments_by_employee(adjustments, AdjustmentKind::Deduction, period)?,
    })
}
