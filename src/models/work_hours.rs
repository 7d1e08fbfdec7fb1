//! Logged work-hour entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, RecordId};
use crate::error::EngineResult;
use crate::validation::{optional_text, require_non_negative, require_storable_date};

/// A logged work session for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHourEntry {
    /// Unique identifier for the entry.
    pub id: RecordId,
    /// The employee who worked.
    pub employee_id: EmployeeId,
    /// The date the hours were worked.
    pub work_date: NaiveDate,
    /// The number of hours worked.
    pub hours: Decimal,
    /// Optional free-text note.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Input for logging hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkHours {
    /// The employee who worked.
    pub employee_id: EmployeeId,
    /// The date the hours were worked.
    pub work_date: NaiveDate,
    /// The number of hours worked (must not be negative).
    pub hours: Decimal,
    /// Optional free-text note.
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewWorkHours {
    /// Checks that hours are not negative.
    pub fn validate(&self) -> EngineResult<()> {
        require_storable_date("work_date", self.work_date)?;
        require_non_negative("hours", self.hours)
    }

    /// Builds the stored entry once an id has been assigned.
    pub fn into_entry(self, id: RecordId) -> WorkHourEntry {
        WorkHourEntry {
            id,
            employee_id: self.employee_id,
            work_date: self.work_date,
            hours: self.hours,
            notes: optional_text(self.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn create_new_work_hours(hours: &str) -> NewWorkHours {
        NewWorkHours {
            employee_id: EmployeeId(1),
            work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            hours: Decimal::from_str(hours).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_validate_accepts_fractional_hours() {
        assert!(create_new_work_hours("7.5").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_hours() {
        assert!(create_new_work_hours("-2").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_five_digit_year() {
        let mut new_hours = create_new_work_hours("8");
        new_hours.work_date = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        let err = new_hours.validate().unwrap_err();
        assert!(matches!(err, EngineError::Validation { ref field, .. } if field == "work_date"));
    }

    #[test]
    fn test_into_entry_drops_blank_notes() {
        let mut new_hours = create_new_work_hours("8");
        new_hours.notes = Some(String::new());
        let entry = new_hours.into_entry(5);
        assert_eq!(entry.id, 5);
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_deserialize_without_notes() {
        let json = r#"{
            "employee_id": 2,
            "work_date": "2026-03-02",
            "hours": "4.25"
        }"#;
        let new_hours: NewWorkHours = serde_json::from_str(json).unwrap();
        assert_eq!(new_hours.employee_id, EmployeeId(2));
        assert_eq!(new_hours.hours, Decimal::new(425, 2));
        assert!(new_hours.notes.is_none());
    }
}
