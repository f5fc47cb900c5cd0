//! Employee API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        employee::{CreateEmployee, Employee, UpdateEmployee},
        ListParams,
    },
    AppState,
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    pub items: Vec<Employee>,
    pub next_cursor: Option<String>,
}

/// List employees, one page at a time
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "Employee page", body = EmployeePage),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<EmployeePage>> {
    let query = state.services.employees.query_from_params(&params).await?;
    let page = state.services.employees.list(&query).await?;
    Ok(Json(EmployeePage {
        items: page.items,
        next_cursor: page.cursor.map(|c| c.id),
    }))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = Employee),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.services.employees.get(&id).await?))
}

#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Name is required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let id = state.services.employees.add(&data).await?;
    let employee = state.services.employees.get(&id).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    state.services.employees.update(&id, &data).await?;
    Ok(Json(state.services.employees.get(&id).await?))
}

/// Delete an employee. Equipment assigned to it keeps the stale reference.
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.employees.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
