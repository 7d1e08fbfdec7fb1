//! HTTP API module for the payroll engine.
//!
//! This module exposes the record store and the payroll calculator as a
//! small JSON-over-HTTP surface.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AdjustmentRequest, EmployeeRequest, NameQuery, PeriodQuery, WorkHoursRequest};
pub use response::{AdjustmentDetail, ApiError, CreatedResponse, WorkHoursDetail};
pub use state::AppState;
