//! Property-based tests for payroll calculation.
//!
//! Each case seeds an in-memory store with a random roster, random hours and
//! random adjustments, then checks the report against rules that must hold
//! for every input.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::calculate_payroll;
use payroll_engine::error::EngineError;
use payroll_engine::models::{
    AdjustmentKind, EmployeeId, NewAdjustment, NewEmployee, NewWorkHours, PayPeriod,
};
use payroll_engine::store::{InMemoryStore, RecordStore};

const DAYS: i64 = 60;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    base_date() + Duration::days(offset)
}

#[derive(Debug, Clone)]
struct EmployeeSeed {
    name: String,
    rate_cents: i64,
}

#[derive(Debug, Clone)]
struct HoursSeed {
    employee: usize,
    day: i64,
    hundredths: i64,
}

#[derive(Debug, Clone)]
struct AdjustmentSeed {
    employee: usize,
    day: i64,
    bonus: bool,
    cents: i64,
}

/// Strategy for employees with short, frequently repeating names
fn employee_strategy() -> impl Strategy<Value = EmployeeSeed> {
    ("[A-Ca-c]{1,3}", 0i64..10_000).prop_map(|(name, rate_cents)| EmployeeSeed { name, rate_cents })
}

fn hours_strategy() -> impl Strategy<Value = HoursSeed> {
    (0usize..8, 0..DAYS, 0i64..1_600).prop_map(|(employee, day, hundredths)| HoursSeed {
        employee,
        day,
        hundredths,
    })
}

fn adjustment_strategy() -> impl Strategy<Value = AdjustmentSeed> {
    (0usize..8, 0..DAYS, any::<bool>(), 0i64..50_000).prop_map(|(employee, day, bonus, cents)| {
        AdjustmentSeed {
            employee,
            day,
            bonus,
            cents,
        }
    })
}

/// Seeds a store; entry seeds pick an employee by index modulo the roster.
fn seed_store(
    employees: &[EmployeeSeed],
    hours: &[HoursSeed],
    adjustments: &[AdjustmentSeed],
) -> (InMemoryStore, Vec<EmployeeId>) {
    let store = InMemoryStore::new();
    let ids: Vec<EmployeeId> = employees
        .iter()
        .map(|seed| {
            store
                .create_employee(NewEmployee {
                    full_name: seed.name.clone(),
                    role_title: "Associate".to_string(),
                    hourly_rate: Decimal::new(seed.rate_cents, 2),
                    start_date: base_date(),
                })
                .unwrap()
        })
        .collect();

    if ids.is_empty() {
        return (store, ids);
    }

    for seed in hours {
        store
            .create_work_hours(NewWorkHours {
                employee_id: ids[seed.employee % ids.len()],
                work_date: day(seed.day),
                hours: Decimal::new(seed.hundredths, 2),
                notes: None,
            })
            .unwrap();
    }
    for seed in adjustments {
        store
            .create_adjustment(NewAdjustment {
                employee_id: ids[seed.employee % ids.len()],
                adjustment_date: day(seed.day),
                kind: if seed.bonus {
                    AdjustmentKind::Bonus
                } else {
                    AdjustmentKind::Deduction
                },
                amount: Decimal::new(seed.cents, 2),
                description: None,
            })
            .unwrap();
    }

    (store, ids)
}

/// Property: every registered employee gets exactly one row, and every row
/// satisfies the pay formula.
#[test]
fn prop_one_row_per_employee_with_exact_formula() {
    proptest!(|(
        employees in prop::collection::vec(employee_strategy(), 0..8),
        hours in prop::collection::vec(hours_strategy(), 0..40),
        adjustments in prop::collection::vec(adjustment_strategy(), 0..20),
        start in 0..DAYS,
        len in 0..DAYS,
    )| {
        let (store, ids) = seed_store(&employees, &hours, &adjustments);
        let period = PayPeriod::new(day(start), day(start + len)).unwrap();

        let report = calculate_payroll(&store, &period).unwrap();

        prop_assert_eq!(report.rows.len(), ids.len());
        let mut row_ids: Vec<EmployeeId> = report.rows.iter().map(|row| row.employee_id).collect();
        row_ids.sort();
        prop_assert_eq!(row_ids, ids);

        for row in &report.rows {
            prop_assert_eq!(row.gross_pay, row.total_hours * row.hourly_rate);
            prop_assert_eq!(row.net_pay, row.gross_pay + row.bonus_total - row.deduction_total);
        }
    });
}

/// Property: rows are ordered by name, then by id among equal names.
#[test]
fn prop_rows_sorted_by_name_then_id() {
    proptest!(|(employees in prop::collection::vec(employee_strategy(), 0..12))| {
        let (store, _) = seed_store(&employees, &[], &[]);
        let period = PayPeriod::new(day(0), day(DAYS)).unwrap();

        let report = calculate_payroll(&store, &period).unwrap();

        for pair in report.rows.windows(2) {
            let left = (&pair[0].full_name, pair[0].employee_id);
            let right = (&pair[1].full_name, pair[1].employee_id);
            prop_assert!(left < right, "{:?} should sort before {:?}", left, right);
        }
    });
}

/// Property: totals match a brute-force sum over the entries inside the range.
#[test]
fn prop_totals_match_entries_in_range() {
    proptest!(|(
        employees in prop::collection::vec(employee_strategy(), 1..6),
        hours in prop::collection::vec(hours_strategy(), 0..40),
        adjustments in prop::collection::vec(adjustment_strategy(), 0..20),
        start in 0..DAYS,
        len in 0..DAYS,
    )| {
        let (store, ids) = seed_store(&employees, &hours, &adjustments);
        let end = start + len;
        let period = PayPeriod::new(day(start), day(end)).unwrap();

        let mut expected_hours: HashMap<EmployeeId, Decimal> = HashMap::new();
        for seed in hours.iter().filter(|seed| seed.day >= start && seed.day <= end) {
            *expected_hours.entry(ids[seed.employee % ids.len()]).or_default() +=
                Decimal::new(seed.hundredths, 2);
        }
        let mut expected_net_adjustment: HashMap<EmployeeId, Decimal> = HashMap::new();
        for seed in adjustments.iter().filter(|seed| seed.day >= start && seed.day <= end) {
            let signed = if seed.bonus {
                Decimal::new(seed.cents, 2)
            } else {
                -Decimal::new(seed.cents, 2)
            };
            *expected_net_adjustment.entry(ids[seed.employee % ids.len()]).or_default() += signed;
        }

        let report = calculate_payroll(&store, &period).unwrap();

        for row in &report.rows {
            let hours = expected_hours.get(&row.employee_id).copied().unwrap_or_default();
            let adjustment = expected_net_adjustment
                .get(&row.employee_id)
                .copied()
                .unwrap_or_default();
            prop_assert_eq!(row.total_hours, hours);
            prop_assert_eq!(row.bonus_total - row.deduction_total, adjustment);
        }
    });
}

/// Property: splitting a range at any day gives per-employee sums that add
/// up to the sums over the whole range.
#[test]
fn prop_contiguous_ranges_are_additive() {
    proptest!(|(
        employees in prop::collection::vec(employee_strategy(), 1..6),
        hours in prop::collection::vec(hours_strategy(), 0..40),
        adjustments in prop::collection::vec(adjustment_strategy(), 0..20),
        split in 0..(DAYS - 1),
    )| {
        let (store, _) = seed_store(&employees, &hours, &adjustments);
        let whole = PayPeriod::new(day(0), day(DAYS - 1)).unwrap();
        let first = PayPeriod::new(day(0), day(split)).unwrap();
        let second = PayPeriod::new(day(split + 1), day(DAYS - 1)).unwrap();

        let whole = calculate_payroll(&store, &whole).unwrap();
        let first = calculate_payroll(&store, &first).unwrap();
        let second = calculate_payroll(&store, &second).unwrap();

        // Same roster, same order in all three reports
        for ((w, a), b) in whole.rows.iter().zip(&first.rows).zip(&second.rows) {
            prop_assert_eq!(w.employee_id, a.employee_id);
            prop_assert_eq!(w.employee_id, b.employee_id);
            prop_assert_eq!(w.total_hours, a.total_hours + b.total_hours);
            prop_assert_eq!(w.gross_pay, a.gross_pay + b.gross_pay);
            prop_assert_eq!(w.bonus_total, a.bonus_total + b.bonus_total);
            prop_assert_eq!(w.deduction_total, a.deduction_total + b.deduction_total);
            prop_assert_eq!(w.net_pay, a.net_pay + b.net_pay);
        }
        prop_assert_eq!(whole.totals.net_pay, first.totals.net_pay + second.totals.net_pay);
    });
}

/// Property: a reversed range is always rejected and never produces a report.
#[test]
fn prop_reversed_range_rejected() {
    proptest!(|(start in 1..DAYS, back in 1i64..30)| {
        let end = day(start) - Duration::days(back);
        let err = PayPeriod::new(day(start), end).unwrap_err();
        let is_invalid_range = matches!(err, EngineError::InvalidRange { .. });
        prop_assert!(is_invalid_range);

        let store = InMemoryStore::new();
        let reversed = PayPeriod { start_date: day(start), end_date: end };
        prop_assert!(calculate_payroll(&store, &reversed).is_err());
    });
}
