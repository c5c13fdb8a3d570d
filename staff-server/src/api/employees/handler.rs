//! Employee API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::{Employee, EmployeeInput, EmployeeQuery, MessageBody};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// List employees matching the optional name / department / status filter
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let employees = state.employees().find_all(filter).await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = state
        .employees()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let Json(payload) = payload?;
    let employee = state.employees().create(payload).await?;

    tracing::info!(id = %employee.id, name = %employee.name, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Replace every mutable field of an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let Json(payload) = payload?;
    let employee = state.employees().replace(&id, payload).await?;

    tracing::info!(id = %id, "Employee updated");
    Ok(Json(employee))
}

/// Hard delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageBody>> {
    state.employees().delete(&id).await?;

    tracing::info!(id = %id, "Employee deleted");
    Ok(Json(MessageBody::new("Employee deleted")))
}
