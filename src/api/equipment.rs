//! Equipment API endpoints

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
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        ListParams,
    },
    AppState,
};

use super::AuthenticatedUser;

/// One page of equipment
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPage {
    pub items: Vec<Equipment>,
    /// Pass as `startAfter` to fetch the next page; absent once a page comes back empty
    pub next_cursor: Option<String>,
}

/// List equipment, one page at a time
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "Equipment page", body = EquipmentPage),
        (status = 400, description = "Unknown núcleo", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<EquipmentPage>> {
    let query = state.services.equipment.query_from_params(&params).await?;
    let page = state.services.equipment.list(&query).await?;
    Ok(Json(EquipmentPage {
        items: page.items,
        next_cursor: page.cursor.map(|c| c.id),
    }))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get(&id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Missing required field", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial number already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let id = state.services.equipment.add(&data).await?;
    tracing::debug!("{} added equipment {}", claims.sub, id);
    let equipment = state.services.equipment.get(&id).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment. Send `null` to clear a relation, omit a field to keep it.
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial number belongs to another equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    state.services.equipment.update(&id, &data).await?;
    let equipment = state.services.equipment.get(&id).await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
