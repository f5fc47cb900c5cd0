//! Fixed reference lists for pickers

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::enums::{EquipmentStatus, EquipmentType, UserRole, DEPARTMENTS, NUCLEOS};

use super::{nucleos::NucleoInfo, AuthenticatedUser};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub departments: Vec<String>,
    pub nucleos: Vec<NucleoInfo>,
    pub equipment_types: Vec<EquipmentType>,
    pub equipment_statuses: Vec<EquipmentStatus>,
    pub roles: Vec<UserRole>,
}

/// Departments, núcleos, equipment types, statuses and roles
#[utoipa::path(
    get,
    path = "/reference",
    tag = "reference",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reference lists", body = ReferenceData)
    )
)]
pub async fn get_reference(AuthenticatedUser(_claims): AuthenticatedUser) -> Json<ReferenceData> {
    Json(ReferenceData {
        departments: DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
        nucleos: NUCLEOS.iter().map(NucleoInfo::from).collect(),
        equipment_types: EquipmentType::ALL.to_vec(),
        equipment_statuses: EquipmentStatus::ALL.to_vec(),
        roles: UserRole::ALL.to_vec(),
    })
}
