//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the record store, the aggregator and the payroll
//! calculator can raise.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::EmployeeId;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "hours".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'hours': must not be negative");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was malformed or out of domain (negative amount, empty text).
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A date range whose start falls after its end.
    #[error("Invalid date range: start {start_date} is after end {end_date}")]
    InvalidRange {
        /// The requested start date.
        start_date: NaiveDate,
        /// The requested end date.
        end_date: NaiveDate,
    },

    /// An entry referenced an employee that does not exist.
    #[error("Employee {employee_id} does not exist")]
    ReferentialIntegrity {
        /// The employee id that could not be resolved.
        employee_id: EmployeeId,
    },

    /// A lookup found no matching record.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of record that was looked up (e.g. "Employee").
        entity: String,
        /// The key used for the lookup.
        key: String,
    },

    /// A sum or product left the range `Decimal` can represent.
    #[error("Arithmetic overflow computing {quantity}")]
    Overflow {
        /// The quantity being computed (e.g. "gross_pay").
        quantity: String,
    },

    /// The underlying storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file exists but could not be read.
    #[error("Failed to read configuration file '{path}': {message}")]
    ConfigReadError {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by caller input, including reversed
    /// ranges and amounts too large to compute with.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation { .. }
                | EngineError::InvalidRange { .. }
                | EngineError::Overflow { .. }
        )
    }

    pub(crate) fn overflow(quantity: &str) -> Self {
        EngineError::Overflow {
            quantity: quantity.to_string(),
        }
    }

    pub(crate) fn storage(message: impl std::fmt::Display) -> Self {
        EngineError::Storage {
            message: message.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
