//! Payroll report calculation.
//!
//! This module joins the employee roster with the per-employee aggregates,
//! applies the pay formula and orders the resulting rows.

use std::time::Instant;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::aggregation::{aggregate_period, EmployeeAggregate, PeriodAggregates};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, PayrollReport, PayrollRow, PayrollTotals};
use crate::store::RecordStore;

/// Applies the pay formula to one employee.
///
/// `gross_pay = total_hours * hourly_rate` and
/// `net_pay = gross_pay + bonus_total - deduction_total`, computed exactly.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{compute_row, EmployeeAggregate};
/// use payroll_engine::models::{Employee, EmployeeId};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: EmployeeId(1),
///     full_name: "Ana Torres".to_string(),
///     role_title: "Cashier".to_string(),
///     hourly_rate: Decimal::from(10),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
/// };
/// let aggregate = EmployeeAggregate {
///     total_hours: Decimal::from(10),
///     bonus_total: Decimal::from(50),
///     deduction_total: Decimal::from(5),
/// };
///
/// let row = compute_row(&employee, &aggregate).unwrap();
/// assert_eq!(row.gross_pay, Decimal::from(100));
/// assert_eq!(row.net_pay, Decimal::from(145));
/// ```
pub fn compute_row(
    employee: &Employee,
    aggregate: &EmployeeAggregate,
) -> EngineResult<PayrollRow> {
    let gross_pay = aggregate
        .total_hours
        .checked_mul(employee.hourly_rate)
        .ok_or_else(|| EngineError::overflow("gross_pay"))?;
    let net_pay = gross_pay
        .checked_add(aggregate.bonus_total)
        .and_then(|pay| pay.checked_sub(aggregate.deduction_total))
        .ok_or_else(|| EngineError::overflow("net_pay"))?;

    Ok(PayrollRow {
        employee_id: employee.id,
        full_name: employee.full_name.clone(),
        hourly_rate: employee.hourly_rate,
        total_hours: aggregate.total_hours,
        gross_pay,
        bonus_total: aggregate.bonus_total,
        deduction_total: aggregate.deduction_total,
        net_pay,
    })
}

/// Builds a report with one row per roster employee.
///
/// Every employee gets a row, with zeros when they had no activity. Rows are
/// ordered by `full_name` using case-sensitive byte-wise comparison, with the
/// employee id breaking ties. An empty roster gives an empty report.
///
/// # Errors
///
/// Returns `InvalidRange` if the period's start falls after its end, or
/// `Overflow` if a row or a total leaves the `Decimal` range.
pub fn build_payroll_report(
    period: &PayPeriod,
    employees: &[Employee],
    aggregates: &PeriodAggregates,
) -> EngineResult<PayrollReport> {
    period.validate()?;

    let mut rows: Vec<PayrollRow> = employees
        .iter()
        .map(|employee| compute_row(employee, &aggregates.for_employee(employee.id)))
        .collect::<EngineResult<_>>()?;
    rows.sort_by(|a, b| {
        a.full_name
            .cmp(&b.full_name)
            .then(a.employee_id.cmp(&b.employee_id))
    });

    let totals = PayrollTotals::from_rows(&rows)?;

    Ok(PayrollReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        pay_period: *period,
        rows,
        totals,
    })
}

/// Computes the payroll report for a period from a record store.
///
/// The roster and both entry collections are read as one snapshot, so the
/// report reflects a single consistent view of the store.
///
/// # Errors
///
/// Returns `InvalidRange` for a reversed period, a storage error if the
/// snapshot cannot be read, or `Overflow` when stored amounts are too large
/// to sum or multiply. Periods without activity are not errors.
pub fn calculate_payroll<S>(store: &S, period: &PayPeriod) -> EngineResult<PayrollReport>
where
    S: RecordStore + ?Sized,
{
    period.validate()?;
    let start_time = Instant::now();

    let snapshot = store.snapshot(period)?;
    let aggregates = aggregate_period(&snapshot.work_hours, &snapshot.adjustments, period)?;
    let report = build_payroll_report(period, &snapshot.employees, &aggregates)?;

    info!(
        report_id = %report.report_id,
        start_date = %period.start_date,
        end_date = %period.end_date,
        employees = report.rows.len(),
        work_hour_entries = snapshot.work_hours.len(),
        adjustment_entries = snapshot.adjustments.len(),
        net_pay_total = %report.totals.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll calculated"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{AdjustmentKind, EmployeeId, NewAdjustment, NewEmployee, NewWorkHours};
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn employee(id: i64, name: &str, rate: &str) -> Employee {
        Employee {
            id: EmployeeId(id),
            full_name: name.to_string(),
            role_title: "Clerk".to_string(),
            hourly_rate: dec(rate),
            start_date: day(1),
        }
    }

    fn register(store: &InMemoryStore, name: &str, rate: &str) -> EmployeeId {
        store
            .create_employee(NewEmployee {
                full_name: name.to_string(),
                role_title: "Clerk".to_string(),
                hourly_rate: dec(rate),
                start_date: day(1),
            })
            .unwrap()
    }

    fn log_hours(store: &InMemoryStore, id: EmployeeId, d: u32, h: &str) {
        store
            .create_work_hours(NewWorkHours {
                employee_id: id,
                work_date: day(d),
                hours: dec(h),
                notes: None,
            })
            .unwrap();
    }

    fn log_adjustment(
        store: &InMemoryStore,
        id: EmployeeId,
        d: u32,
        kind: AdjustmentKind,
        amount: &str,
    ) {
        store
            .create_adjustment(NewAdjustment {
                employee_id: id,
                adjustment_date: day(d),
                kind,
                amount: dec(amount),
                description: None,
            })
            .unwrap();
    }

    #[test]
    fn test_compute_row_with_no_activity_is_zero() {
        let row =
            compute_row(&employee(1, "B", "22.75"), &EmployeeAggregate::default()).unwrap();
        assert!(row.total_hours.is_zero());
        assert!(row.gross_pay.is_zero());
        assert!(row.net_pay.is_zero());
        assert_eq!(row.hourly_rate, dec("22.75"));
    }

    #[test]
    fn test_compute_row_deductions_can_exceed_gross() {
        let aggregate = EmployeeAggregate {
            total_hours: dec("1"),
            bonus_total: Decimal::ZERO,
            deduction_total: dec("30"),
        };
        let row = compute_row(&employee(1, "A", "10"), &aggregate).unwrap();
        assert_eq!(row.net_pay, dec("-20"));
    }

    #[test]
    fn test_compute_row_overflow_is_error() {
        let aggregate = EmployeeAggregate {
            total_hours: dec("2"),
            ..EmployeeAggregate::default()
        };
        let err = compute_row(&employee(1, "A", &Decimal::MAX.to_string()), &aggregate)
            .unwrap_err();
        assert!(matches!(err, EngineError::Overflow { ref quantity } if quantity == "gross_pay"));

        let aggregate = EmployeeAggregate {
            total_hours: dec("1"),
            bonus_total: Decimal::MAX,
            deduction_total: Decimal::ZERO,
        };
        let err = compute_row(&employee(1, "A", "10"), &aggregate).unwrap_err();
        assert!(matches!(err, EngineError::Overflow { ref quantity } if quantity == "net_pay"));
    }

    #[test]
    fn test_huge_stored_rate_fails_without_panicking() {
        let store = InMemoryStore::new();
        let id = register(&store, "Ana", &Decimal::MAX.to_string());
        log_hours(&store, id, 2, "2");

        let period = PayPeriod::new(day(1), day(15)).unwrap();
        let err = calculate_payroll(&store, &period).unwrap_err();

        assert!(err.is_validation());
        // Periods without the oversized entry still compute
        let later = PayPeriod::new(day(3), day(15)).unwrap();
        assert!(calculate_payroll(&store, &later).is_ok());
    }

    #[test]
    fn test_report_sorted_by_name_then_id() {
        let employees = vec![
            employee(3, "Carla", "10"),
            employee(2, "Bruno", "10"),
            employee(5, "Ana", "10"),
            employee(1, "Bruno", "10"),
        ];
        let period = PayPeriod::new(day(1), day(15)).unwrap();
        let report =
            build_payroll_report(&period, &employees, &PeriodAggregates::default()).unwrap();

        let order: Vec<(String, i64)> = report
            .rows
            .iter()
            .map(|r| (r.full_name.clone(), r.employee_id.0))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Ana".to_string(), 5),
                ("Bruno".to_string(), 1),
                ("Bruno".to_string(), 2),
                ("Carla".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let employees = vec![employee(1, "ana", "10"), employee(2, "Zoe", "10")];
        let period = PayPeriod::new(day(1), day(15)).unwrap();
        let report =
            build_payroll_report(&period, &employees, &PeriodAggregates::default()).unwrap();
        // Uppercase sorts before lowercase in byte order
        assert_eq!(report.rows[0].full_name, "Zoe");
        assert_eq!(report.rows[1].full_name, "ana");
    }

    #[test]
    fn test_empty_roster_gives_empty_report() {
        let store = InMemoryStore::new();
        let period = PayPeriod::new(day(1), day(15)).unwrap();
        let report = calculate_payroll(&store, &period).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.totals, PayrollTotals::default());
        assert_eq!(report.pay_period, period);
    }

    #[test]
    fn test_reversed_period_rejected() {
        let store = InMemoryStore::new();
        let reversed = PayPeriod {
            start_date: day(15),
            end_date: day(1),
        };
        let err = calculate_payroll(&store, &reversed).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));

        let err = build_payroll_report(&reversed, &[], &PeriodAggregates::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_worked_example_with_idle_employee() {
        let store = InMemoryStore::new();
        let a = register(&store, "Employee A", "10");
        let b = register(&store, "Employee B", "12");
        log_hours(&store, a, 1, "8");
        log_hours(&store, a, 2, "2");
        log_adjustment(&store, a, 1, AdjustmentKind::Bonus, "50");
        log_adjustment(&store, a, 2, AdjustmentKind::Deduction, "5");
        // Outside the period
        log_hours(&store, b, 20, "6");

        let period = PayPeriod::new(day(1), day(15)).unwrap();
        let report = calculate_payroll(&store, &period).unwrap();
        assert_eq!(report.rows.len(), 2);

        let row_a = &report.rows[0];
        assert_eq!(row_a.employee_id, a);
        assert_eq!(row_a.total_hours, dec("10"));
        assert_eq!(row_a.gross_pay, dec("100"));
        assert_eq!(row_a.bonus_total, dec("50"));
        assert_eq!(row_a.deduction_total, dec("5"));
        assert_eq!(row_a.net_pay, dec("145"));

        let row_b = &report.rows[1];
        assert_eq!(row_b.employee_id, b);
        assert!(!row_b.has_activity());
        assert!(row_b.gross_pay.is_zero());
        assert!(row_b.net_pay.is_zero());

        assert_eq!(report.totals.net_pay, dec("145"));
    }

    #[test]
    fn test_fractional_rate_and_hours_are_exact() {
        let store = InMemoryStore::new();
        let id = register(&store, "Ana", "15.33");
        for d in 1..=3 {
            log_hours(&store, id, d, "7.75");
        }
        let period = PayPeriod::new(day(1), day(3)).unwrap();
        let report = calculate_payroll(&store, &period).unwrap();
        // 23.25 h * 15.33 = 356.4225, kept unrounded
        assert_eq!(report.rows[0].gross_pay, dec("356.4225"));
    }
}
