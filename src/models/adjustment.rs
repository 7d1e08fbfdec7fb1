//! Pay adjustments: bonuses and deductions.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, RecordId};
use crate::error::{EngineError, EngineResult};
use crate::validation::{optional_text, require_non_negative, require_storable_date};

/// Whether an adjustment adds to or subtracts from net pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AdjustmentKind;
///
/// assert_eq!(AdjustmentKind::Bonus.as_str(), "bonus");
/// assert_eq!("deduction".parse::<AdjustmentKind>().unwrap(), AdjustmentKind::Deduction);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Added to net pay.
    Bonus,
    /// Subtracted from net pay.
    Deduction,
}

impl AdjustmentKind {
    /// The stored name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Bonus => "bonus",
            AdjustmentKind::Deduction => "deduction",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bonus" => Ok(AdjustmentKind::Bonus),
            "deduction" => Ok(AdjustmentKind::Deduction),
            other => Err(EngineError::Validation {
                field: "adjustment_type".to_string(),
                message: format!("unknown adjustment type '{}'", other),
            }),
        }
    }
}

/// A dated bonus or deduction attached to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    /// Unique identifier for the entry.
    pub id: RecordId,
    /// The employee the adjustment applies to.
    pub employee_id: EmployeeId,
    /// The date of the adjustment.
    pub adjustment_date: NaiveDate,
    /// Bonus or deduction.
    #[serde(rename = "adjustment_type")]
    pub kind: AdjustmentKind,
    /// The adjustment amount, always non-negative; the kind gives the sign.
    pub amount: Decimal,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for logging an adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAdjustment {
    /// The employee the adjustment applies to.
    pub employee_id: EmployeeId,
    /// The date of the adjustment.
    pub adjustment_date: NaiveDate,
    /// Bonus or deduction.
    #[serde(rename = "adjustment_type")]
    pub kind: AdjustmentKind,
    /// The adjustment amount (must not be negative).
    pub amount: Decimal,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewAdjustment {
    /// Checks that the amount is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        require_storable_date("adjustment_date", self.adjustment_date)?;
        require_non_negative("amount", self.amount)
    }

    /// Builds the stored entry once an id has been assigned.
    pub fn into_entry(self, id: RecordId) -> AdjustmentEntry {
        AdjustmentEntry {
            id,
            employee_id: self.employee_id,
            adjustment_date: self.adjustment_date,
            kind: self.kind,
            amount: self.amount,
            description: optional_text(self.description),
        }
    }
}
