//! Durable storage of employees, work-hour entries and adjustments.
//!
//! The [`RecordStore`] trait is the only way the calculator reads data. Two
//! backends are provided: [`InMemoryStore`] for tests and ephemeral runs, and
//! [`SqliteStore`] for durable single-writer persistence.
//!
//! Every create validates its input, then checks that the referenced
//! employee exists, then writes. A failure at any step leaves the store
//! unchanged.

mod memory;
mod sqlite;

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::error::EngineResult;
use crate::models::{
    AdjustmentEntry, Employee, EmployeeId, NewAdjustment, NewEmployee, NewWorkHours, PayPeriod,
    RecordId, WorkHourEntry,
};

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// A consistent read of everything a payroll run needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSnapshot {
    /// The full roster, ordered by id.
    pub employees: Vec<Employee>,
    /// Work-hour entries dated within the period.
    pub work_hours: Vec<WorkHourEntry>,
    /// Adjustments dated within the period.
    pub adjustments: Vec<AdjustmentEntry>,
}

/// Create and range-read operations over the three record collections.
///
/// Range reads are inclusive of both ends and fail with `InvalidRange` for a
/// reversed period. Reads never mutate.
pub trait RecordStore: Send + Sync {
    /// Registers an employee and returns its new id.
    fn create_employee(&self, new_employee: NewEmployee) -> EngineResult<EmployeeId>;

    /// Logs hours for an existing employee.
    ///
    /// Fails with `ReferentialIntegrity` if the employee does not exist.
    fn create_work_hours(&self, new_hours: NewWorkHours) -> EngineResult<RecordId>;

    /// Logs a bonus or deduction for an existing employee.
    ///
    /// Fails with `ReferentialIntegrity` if the employee does not exist.
    fn create_adjustment(&self, new_adjustment: NewAdjustment) -> EngineResult<RecordId>;

    /// Fetches one employee, or `NotFound`.
    fn get_employee(&self, id: EmployeeId) -> EngineResult<Employee>;

    /// Resolves a full name to an employee. The lowest id wins when names
    /// repeat; `NotFound` when nothing matches.
    fn find_employee_by_name(&self, full_name: &str) -> EngineResult<Employee>;

    /// The full roster, ordered by id.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Work-hour entries dated within the period, ordered by date then id.
    fn list_work_hours(&self, period: &PayPeriod) -> EngineResult<Vec<WorkHourEntry>>;

    /// Adjustments dated within the period, ordered by date then id.
    fn list_adjustments(&self, period: &PayPeriod) -> EngineResult<Vec<AdjustmentEntry>>;

    /// Reads the roster and both entry collections for a period.
    ///
    /// Backends override this to take all three reads from one consistent
    /// view; the default simply issues them in turn.
    fn snapshot(&self, period: &PayPeriod) -> EngineResult<PeriodSnapshot> {
        period.validate()?;
        Ok(PeriodSnapshot {
            employees: self.list_employees()?,
            work_hours: self.list_work_hours(period)?,
            adjustments: self.list_adjustments(period)?,
        })
    }
}

/// Opens the backend selected by the configuration.
pub fn open_store(config: &StorageConfig) -> EngineResult<Arc<dyn RecordStore>> {
    match config {
        StorageConfig::Memory => {
            info!(backend = "memory", "Opening record store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageConfig::Sqlite { path } => {
            info!(backend = "sqlite", path = %path, "Opening record store");
            Ok(Arc::new(SqliteStore::open(path)?))
        }
    }
}
