//! Response types for the payroll API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AdjustmentEntry, AdjustmentKind, EmployeeId, RecordId, WorkHourEntry};

/// Body returned when a record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// The id assigned to the new record.
    pub id: i64,
}

/// A work-hour entry joined with the employee's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHoursDetail {
    /// The entry id.
    pub id: RecordId,
    /// The employee's full name.
    pub full_name: String,
    /// The employee id.
    pub employee_id: EmployeeId,
    /// The date worked.
    pub work_date: NaiveDate,
    /// Hours worked.
    pub hours: Decimal,
    /// Optional note.
    pub notes: Option<String>,
}

impl WorkHoursDetail {
    /// Joins an entry with its employee's name.
    pub fn new(entry: WorkHourEntry, full_name: String) -> Self {
        Self {
            id: entry.id,
            full_name,
            employee_id: entry.employee_id,
            work_date: entry.work_date,
            hours: entry.hours,
            notes: entry.notes,
        }
    }
}

/// An adjustment joined with the employee's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDetail {
    /// The entry id.
    pub id: RecordId,
    /// The employee's full name.
    pub full_name: String,
    /// The employee id.
    pub employee_id: EmployeeId,
    /// The adjustment date.
    pub adjustment_date: NaiveDate,
    /// Bonus or deduction.
    pub adjustment_type: AdjustmentKind,
    /// The amount.
    pub amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

impl AdjustmentDetail {
    /// Joins an entry with its employee's name.
    pub fn new(entry: AdjustmentEntry, full_name: String) -> Self {
        Self {
            id: entry.id,
            full_name,
            employee_id: entry.employee_id,
            adjustment_date: entry.adjustment_date,
            adjustment_type: entry.kind,
            amount: entry.amount,
            description: entry.description,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed request error response.
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_REQUEST", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::InvalidRange {
                start_date,
                end_date,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_RANGE",
                    format!(
                        "Start date {} is after end date {}",
                        start_date, end_date
                    ),
                    "start_date must not be after end_date",
                ),
            },
            EngineError::ReferentialIntegrity { employee_id } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "REFERENTIAL_INTEGRITY",
                    format!("Employee {} does not exist", employee_id),
                    "Entries can only be logged for registered employees",
                ),
            },
            EngineError::NotFound { entity, key } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("{} not found: {}", entity, key)),
            },
            EngineError::Overflow { quantity } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "ARITHMETIC_OVERFLOW",
                    format!("Stored amounts are too large to compute {}", quantity),
                    quantity,
                ),
            },
            EngineError::Storage { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigReadError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Failed to read {}: {}", path, message),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
