//! SQLite-backed record store.
//!
//! Money and hours are stored as decimal TEXT so nothing passes through
//! binary floating point. Dates are ISO-8601 TEXT, which keeps `BETWEEN`
//! comparisons correct as plain string comparisons.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use rust_decimal::Decimal;
use tracing::debug;

use super::{PeriodSnapshot, RecordStore};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentEntry, AdjustmentKind, Employee, EmployeeId, NewAdjustment, NewEmployee,
    NewWorkHours, PayPeriod, RecordId, WorkHourEntry,
};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        role_title TEXT NOT NULL,
        hourly_rate TEXT NOT NULL,
        start_date TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS work_hours (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        work_date TEXT NOT NULL,
        hours TEXT NOT NULL,
        notes TEXT,
        FOREIGN KEY (employee_id) REFERENCES employees (id)
    );

    CREATE TABLE IF NOT EXISTS adjustments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        adjustment_date TEXT NOT NULL,
        adjustment_type TEXT NOT NULL CHECK (adjustment_type IN ('bonus', 'deduction')),
        amount TEXT NOT NULL,
        description TEXT,
        FOREIGN KEY (employee_id) REFERENCES employees (id)
    );

    CREATE INDEX IF NOT EXISTS idx_work_hours_date ON work_hours (work_date);
    CREATE INDEX IF NOT EXISTS idx_adjustments_date ON adjustments (adjustment_date);
";

const SELECT_EMPLOYEES: &str =
    "SELECT id, full_name, role_title, hourly_rate, start_date FROM employees";

type EmployeeRow = (i64, String, String, String, String);
type WorkHoursRow = (i64, i64, String, String, Option<String>);
type AdjustmentRow = (i64, i64, String, String, String, Option<String>);

/// A [`RecordStore`] persisted in a SQLite database file.
///
/// The connection sits behind a mutex, so all access through one store is
/// serialized. Each write runs in its own transaction; snapshots run inside a
/// single read transaction. A transaction that is not committed is rolled
/// back when it goes out of scope, including on error returns.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    ///
    /// The special path `:memory:` opens a private in-memory database.
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(EngineError::storage)?;

        conn.pragma_update(None, "foreign_keys", true)
            .map_err(EngineError::storage)?;
        if path != ":memory:" {
            let mode: String = conn
                .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
                .map_err(EngineError::storage)?;
            debug!(journal_mode = %mode, "SQLite journal mode set");
        }
        conn.execute_batch(SCHEMA).map_err(EngineError::storage)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| EngineError::storage("SQLite connection lock poisoned"))
    }

    fn require_employee(tx: &Transaction<'_>, id: EmployeeId) -> EngineResult<()> {
        let exists: bool = tx
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM employees WHERE id = ?1)",
                params![id.0],
                |row| row.get(0),
            )
            .map_err(EngineError::storage)?;
        if exists {
            Ok(())
        } else {
            Err(EngineError::ReferentialIntegrity { employee_id: id })
        }
    }

    fn query_employees(conn: &Connection) -> EngineResult<Vec<Employee>> {
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id", SELECT_EMPLOYEES))
            .map_err(EngineError::storage)?;
        let rows = stmt
            .query_map([], read_employee_row)
            .map_err(EngineError::storage)?
            .collect::<Result<Vec<EmployeeRow>, _>>()
            .map_err(EngineError::storage)?;
        rows.into_iter().map(employee_from_row).collect()
    }

    fn query_work_hours(
        conn: &Connection,
        period: &PayPeriod,
    ) -> EngineResult<Vec<WorkHourEntry>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, employee_id, work_date, hours, notes
                 FROM work_hours
                 WHERE work_date BETWEEN ?1 AND ?2
                 ORDER BY work_date, id",
            )
            .map_err(EngineError::storage)?;
        let rows = stmt
            .query_map(
                params![date_to_str(period.start_date), date_to_str(period.end_date)],
                read_work_hours_row,
            )
            .map_err(EngineError::storage)?
            .collect::<Result<Vec<WorkHoursRow>, _>>()
            .map_err(EngineError::storage)?;

        rows.into_iter().map(work_hours_from_row).collect()
    }

    fn query_adjustments(
        conn: &Connection,
        period: &PayPeriod,
    ) -> EngineResult<Vec<AdjustmentEntry>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, employee_id, adjustment_date, adjustment_type, amount, description
                 FROM adjustments
                 WHERE adjustment_date BETWEEN ?1 AND ?2
                 ORDER BY adjustment_date, id",
            )
            .map_err(EngineError::storage)?;
        let rows = stmt
            .query_map(
                params![date_to_str(period.start_date), date_to_str(period.end_date)],
                read_adjustment_row,
            )
            .map_err(EngineError::storage)?
            .collect::<Result<Vec<AdjustmentRow>, _>>()
            .map_err(EngineError::storage)?;

        rows.into_iter().map(adjustment_from_row).collect()
    }

    fn query_one_employee(
        conn: &Connection,
        filter: &str,
        key: &dyn rusqlite::ToSql,
        label: String,
    ) -> EngineResult<Employee> {
        let row = conn
            .query_row(
                &format!("{} WHERE {} ORDER BY id LIMIT 1", SELECT_EMPLOYEES, filter),
                params![key],
                read_employee_row,
            )
            .optional()
            .map_err(EngineError::storage)?;
        match row {
            Some(row) => employee_from_row(row),
            None => Err(EngineError::NotFound {
                entity: "Employee".to_string(),
                key: label,
            }),
        }
    }
}

impl RecordStore for SqliteStore {
    fn create_employee(&self, new_employee: NewEmployee) -> EngineResult<EmployeeId> {
        new_employee.validate()?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO employees (full_name, role_title, hourly_rate, start_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                new_employee.full_name,
                new_employee.role_title,
                new_employee.hourly_rate.to_string(),
                date_to_str(new_employee.start_date)
            ],
        )
        .map_err(EngineError::storage)?;
        let id = EmployeeId(conn.last_insert_rowid());
        debug!(employee_id = %id, "Employee created");
        Ok(id)
    }

    fn create_work_hours(&self, new_hours: NewWorkHours) -> EngineResult<RecordId> {
        new_hours.validate()?;
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(EngineError::storage)?;
        Self::require_employee(&tx, new_hours.employee_id)?;

        let entry = new_hours.into_entry(0);
        tx.execute(
            "INSERT INTO work_hours (employee_id, work_date, hours, notes)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.employee_id.0,
                date_to_str(entry.work_date),
                entry.hours.to_string(),
                entry.notes
            ],
        )
        .map_err(EngineError::storage)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(EngineError::storage)?;
        debug!(entry_id = id, "Work hours logged");
        Ok(id)
    }

    fn create_adjustment(&self, new_adjustment: NewAdjustment) -> EngineResult<RecordId> {
        new_adjustment.validate()?;
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(EngineError::storage)?;
        Self::require_employee(&tx, new_adjustment.employee_id)?;

        let entry = new_adjustment.into_entry(0);
        tx.execute(
            "INSERT INTO adjustments
                 (employee_id, adjustment_date, adjustment_type, amount, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.employee_id.0,
                date_to_str(entry.adjustment_date),
                entry.kind.as_str(),
                entry.amount.to_string(),
                entry.description
            ],
        )
        .map_err(EngineError::storage)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(EngineError::storage)?;
        debug!(entry_id = id, "Adjustment logged");
        Ok(id)
    }

    fn get_employee(&self, id: EmployeeId) -> EngineResult<Employee> {
        let conn = self.lock()?;
        Self::query_one_employee(&conn, "id = ?1", &id.0, id.to_string())
    }

    fn find_employee_by_name(&self, full_name: &str) -> EngineResult<Employee> {
        let conn = self.lock()?;
        Self::query_one_employee(&conn, "full_name = ?1", &full_name, full_name.to_string())
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let conn = self.lock()?;
        Self::query_employees(&conn)
    }

    fn list_work_hours(&self, period: &PayPeriod) -> EngineResult<Vec<WorkHourEntry>> {
        period.validate()?;
        let conn = self.lock()?;
        Self::query_work_hours(&conn, period)
    }

    fn list_adjustments(&self, period: &PayPeriod) -> EngineResult<Vec<AdjustmentEntry>> {
        period.validate()?;
        let conn = self.lock()?;
        Self::query_adjustments(&conn, period)
    }

    fn snapshot(&self, period: &PayPeriod) -> EngineResult<PeriodSnapshot> {
        period.validate()?;
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(EngineError::storage)?;
        let snapshot = PeriodSnapshot {
            employees: Self::query_employees(&tx)?,
            work_hours: Self::query_work_hours(&tx, period)?,
            adjustments: Self::query_adjustments(&tx, period)?,
        };
        tx.commit().map_err(EngineError::storage)?;
        Ok(snapshot)
    }
}

fn read_employee_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EmployeeRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn read_work_hours_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkHoursRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn read_adjustment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AdjustmentRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn employee_from_row(
    (id, full_name, role_title, hourly_rate, start_date): EmployeeRow,
) -> EngineResult<Employee> {
    Ok(Employee {
        id: EmployeeId(id),
        full_name,
        role_title,
        hourly_rate: str_to_decimal(&hourly_rate)?,
        start_date: str_to_date(&start_date)?,
    })
}

fn work_hours_from_row(
    (id, employee_id, work_date, hours, notes): WorkHoursRow,
) -> EngineResult<WorkHourEntry> {
    Ok(WorkHourEntry {
        id,
        employee_id: EmployeeId(employee_id),
        work_date: str_to_date(&work_date)?,
        hours: str_to_decimal(&hours)?,
        notes,
    })
}

fn adjustment_from_row(
    (id, employee_id, adjustment_date, kind, amount, description): AdjustmentRow,
) -> EngineResult<AdjustmentEntry> {
    let kind = AdjustmentKind::from_str(&kind)
        .map_err(|_| EngineError::storage(format!("Invalid adjustment type '{}'", kind)))?;
    Ok(AdjustmentEntry {
        id,
        employee_id: EmployeeId(employee_id),
        adjustment_date: str_to_date(&adjustment_date)?,
        kind,
        amount: str_to_decimal(&amount)?,
        description,
    })
}

fn date_to_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn str_to_date(s: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| EngineError::storage(format!("Invalid date '{}': {}", s, e)))
}

fn str_to_decimal(s: &str) -> EngineResult<Decimal> {
    Decimal::from_str(s)
        .map_err(|e| EngineError::storage(format!("Invalid decimal '{}': {}", s, e)))
}
