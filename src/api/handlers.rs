//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::error::EngineError;
use crate::models::{EmployeeId, NewAdjustment, NewEmployee, NewWorkHours};
use crate::store::PeriodSnapshot;

use super::request::{AdjustmentRequest, EmployeeRequest, NameQuery, PeriodQuery, WorkHoursRequest};
use super::response::{
    AdjustmentDetail, ApiError, ApiErrorResponse, CreatedResponse, WorkHoursDetail,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/lookup", get(lookup_employee))
        .route("/employees/:id", get(get_employee))
        .route("/work-hours", get(list_work_hours).post(create_work_hours))
        .route("/adjustments", get(list_adjustments).post(create_adjustment))
        .route("/payroll", get(payroll_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_request(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_request(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_request("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

fn path_rejection_response(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Path parameter error"
    );
    ApiErrorResponse::bad_request(ApiError::malformed_request(body_text)).into_response()
}

/// Handler for POST /employees.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Registering employee");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let new_employee: NewEmployee = request.into();
    match state
        .with_store(move |store| store.create_employee(new_employee))
        .await
    {
        Ok(id) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                "Employee registered"
            );
            json_response(StatusCode::CREATED, CreatedResponse { id: id.0 })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees.
async fn list_employees(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.with_store(|store| store.list_employees()).await {
        Ok(employees) => {
            info!(
                correlation_id = %correlation_id,
                count = employees.len(),
                "Listed employees"
            );
            json_response(StatusCode::OK, employees)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/lookup?full_name=.
async fn lookup_employee(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    match state
        .with_store(move |store| store.find_employee_by_name(&query.full_name))
        .await
    {
        Ok(employee) => json_response(StatusCode::OK, employee),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:id.
async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };

    match state
        .with_store(move |store| store.get_employee(EmployeeId(id)))
        .await
    {
        Ok(employee) => json_response(StatusCode::OK, employee),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /work-hours.
async fn create_work_hours(
    State(state): State<AppState>,
    payload: Result<Json<WorkHoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Logging work hours");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let new_hours: NewWorkHours = request.into();
    let employee_id = new_hours.employee_id;
    match state
        .with_store(move |store| store.create_work_hours(new_hours))
        .await
    {
        Ok(id) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                entry_id = id,
                "Work hours logged"
            );
            json_response(StatusCode::CREATED, CreatedResponse { id })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /adjustments.
async fn create_adjustment(
    State(state): State<AppState>,
    payload: Result<Json<AdjustmentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Logging adjustment");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let new_adjustment: NewAdjustment = request.into();
    let employee_id = new_adjustment.employee_id;
    let kind = new_adjustment.kind;
    match state
        .with_store(move |store| store.create_adjustment(new_adjustment))
        .await
    {
        Ok(id) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                adjustment_type = %kind,
                entry_id = id,
                "Adjustment logged"
            );
            json_response(StatusCode::CREATED, CreatedResponse { id })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Reads a consistent snapshot for the queried range.
async fn period_snapshot(
    state: &AppState,
    query: Result<Query<PeriodQuery>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<PeriodSnapshot, Response> {
    let Query(query) =
        query.map_err(|rejection| query_rejection_response(correlation_id, rejection))?;
    let period = query
        .into_period()
        .map_err(|err| error_response(correlation_id, err))?;
    state
        .with_store(move |store| store.snapshot(&period))
        .await
        .map_err(|err| error_response(correlation_id, err))
}

fn names_by_id(snapshot: &PeriodSnapshot) -> HashMap<EmployeeId, &str> {
    snapshot
        .employees
        .iter()
        .map(|employee| (employee.id, employee.full_name.as_str()))
        .collect()
}

/// Handler for GET /work-hours?start_date=&end_date=.
async fn list_work_hours(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let snapshot = match period_snapshot(&state, query, correlation_id).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    let names = names_by_id(&snapshot);
    let details: Vec<WorkHoursDetail> = snapshot
        .work_hours
        .iter()
        .map(|entry| {
            let name = names.get(&entry.employee_id).copied().unwrap_or_default();
            WorkHoursDetail::new(entry.clone(), name.to_string())
        })
        .collect();

    info!(
        correlation_id = %correlation_id,
        count = details.len(),
        "Listed work hours"
    );
    json_response(StatusCode::OK, details)
}

/// Handler for GET /adjustments?start_date=&end_date=.
async fn list_adjustments(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let snapshot = match period_snapshot(&state, query, correlation_id).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    let names = names_by_id(&snapshot);
    let details: Vec<AdjustmentDetail> = snapshot
        .adjustments
        .iter()
        .map(|entry| {
            let name = names.get(&entry.employee_id).copied().unwrap_or_default();
            AdjustmentDetail::new(entry.clone(), name.to_string())
        })
        .collect();

    info!(
        correlation_id = %correlation_id,
        count = details.len(),
        "Listed adjustments"
    );
    json_response(StatusCode::OK, details)
}

/// Handler for GET /payroll?start_date=&end_date=.
///
/// Returns one row per registered employee for the inclusive range.
async fn payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    let period = match query.into_period() {
        Ok(period) => period,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match state
        .with_store(move |store| calculate_payroll(store, &period))
        .await
    {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %report.report_id,
                employees = report.rows.len(),
                net_pay = %report.totals.net_pay,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Payroll completed successfully"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}
