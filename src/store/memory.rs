//! In-memory record store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::{PeriodSnapshot, RecordStore};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentEntry, Employee, EmployeeId, NewAdjustment, NewEmployee, NewWorkHours, PayPeriod,
    RecordId, WorkHourEntry,
};

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    work_hours: Vec<WorkHourEntry>,
    adjustments: Vec<AdjustmentEntry>,
    last_employee_id: i64,
    last_work_hours_id: RecordId,
    last_adjustment_id: RecordId,
}

impl Tables {
    fn has_employee(&self, id: EmployeeId) -> bool {
        self.employees.iter().any(|e| e.id == id)
    }

    fn require_employee(&self, id: EmployeeId) -> EngineResult<()> {
        if self.has_employee(id) {
            Ok(())
        } else {
            Err(EngineError::ReferentialIntegrity { employee_id: id })
        }
    }

    fn work_hours_in(&self, period: &PayPeriod) -> Vec<WorkHourEntry> {
        let mut entries: Vec<WorkHourEntry> = self
            .work_hours
            .iter()
            .filter(|e| period.contains_date(e.work_date))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.work_date, e.id));
        entries
    }

    fn adjustments_in(&self, period: &PayPeriod) -> Vec<AdjustmentEntry> {
        let mut entries: Vec<AdjustmentEntry> = self
            .adjustments
            .iter()
            .filter(|e| period.contains_date(e.adjustment_date))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.adjustment_date, e.id));
        entries
    }
}

/// A [`RecordStore`] that keeps everything in process memory.
///
/// Ids are assigned sequentially from 1 per collection. Employees are kept in
/// id order because ids only ever grow.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| EngineError::storage("in-memory store lock poisoned"))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| EngineError::storage("in-memory store lock poisoned"))
    }
}

impl RecordStore for InMemoryStore {
    fn create_employee(&self, new_employee: NewEmployee) -> EngineResult<EmployeeId> {
        new_employee.validate()?;
        let mut tables = self.write()?;
        tables.last_employee_id += 1;
        let id = EmployeeId(tables.last_employee_id);
        tables.employees.push(new_employee.into_employee(id));
        debug!(employee_id = %id, "Employee created");
        Ok(id)
    }

    fn create_work_hours(&self, new_hours: NewWorkHours) -> EngineResult<RecordId> {
        new_hours.validate()?;
        let mut tables = self.write()?;
        tables.require_employee(new_hours.employee_id)?;
        tables.last_work_hours_id += 1;
        let id = tables.last_work_hours_id;
        tables.work_hours.push(new_hours.into_entry(id));
        debug!(entry_id = id, "Work hours logged");
        Ok(id)
    }

    fn create_adjustment(&self, new_adjustment: NewAdjustment) -> EngineResult<RecordId> {
        new_adjustment.validate()?;
        let mut tables = self.write()?;
        tables.require_employee(new_adjustment.employee_id)?;
        tables.last_adjustment_id += 1;
        let id = tables.last_adjustment_id;
        tables.adjustments.push(new_adjustment.into_entry(id));
        debug!(entry_id = id, "Adjustment logged");
        Ok(id)
    }

    fn get_employee(&self, id: EmployeeId) -> EngineResult<Employee> {
        self.read()?
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound {
                entity: "Employee".to_string(),
                key: id.to_string(),
            })
    }

    fn find_employee_by_name(&self, full_name: &str) -> EngineResult<Employee> {
        self.read()?
            .employees
            .iter()
            .find(|e| e.full_name == full_name)
            .cloned()
            .ok_or_else(|| EngineError::NotFound {
                entity: "Employee".to_string(),
                key: full_name.to_string(),
            })
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read()?.employees.clone())
    }

    fn list_work_hours(&self, period: &PayPeriod) -> EngineResult<Vec<WorkHourEntry>> {
        period.validate()?;
        Ok(self.read()?.work_hours_in(period))
    }

    fn list_adjustments(&self, period: &PayPeriod) -> EngineResult<Vec<AdjustmentEntry>> {
        period.validate()?;
        Ok(self.read()?.adjustments_in(period))
    }

    fn snapshot(&self, period: &PayPeriod) -> EngineResult<PeriodSnapshot> {
        period.validate()?;
        let tables = self.read()?;
        Ok(PeriodSnapshot {
            employees: tables.employees.clone(),
            work_hours: tables.work_hours_in(period),
            adjustments: tables.adjustments_in(period),
        })
    }
}
