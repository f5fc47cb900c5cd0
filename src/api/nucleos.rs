//! Núcleo endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        employee::Employee,
        enums::{Nucleo, NucleoId, NUCLEOS},
        equipment::Equipment,
        search::{filter, Searchable},
    },
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NucleoInfo {
    pub id: String,
    pub name: String,
}

impl From<&Nucleo> for NucleoInfo {
    fn from(n: &Nucleo) -> Self {
        Self {
            id: n.id.to_string(),
            name: n.name.to_string(),
        }
    }
}

impl Searchable for NucleoInfo {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NucleoQuery {
    /// Case-insensitive substring of the name
    pub q: Option<String>,
}

/// A núcleo with everything assigned to it
#[derive(Serialize, ToSchema)]
pub struct NucleoDetail {
    #[serde(flatten)]
    pub nucleo: NucleoInfo,
    pub employees: Vec<Employee>,
    pub equipment: Vec<Equipment>,
}

/// List núcleos
#[utoipa::path(
    get,
    path = "/nucleos",
    tag = "nucleos",
    security(("bearer_auth" = [])),
    params(NucleoQuery),
    responses(
        (status = 200, description = "Núcleos in fixed order", body = Vec<NucleoInfo>)
    )
)]
pub async fn list_nucleos(
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<NucleoQuery>,
) -> Json<Vec<NucleoInfo>> {
    let all: Vec<NucleoInfo> = NUCLEOS.iter().map(NucleoInfo::from).collect();
    let hits = filter(&all, query.q.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    Json(hits)
}

/// Núcleo with its employees and equipment, both ordered by name
#[utoipa::path(
    get,
    path = "/nucleos/{id}",
    tag = "nucleos",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Núcleo ID, e.g. `salvador`")),
    responses(
        (status = 200, description = "Núcleo details", body = NucleoDetail),
        (status = 400, description = "Unknown núcleo", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_nucleo(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<NucleoDetail>> {
    let nucleo = NucleoId::try_from(id.as_str())?;
    let (employees, equipment) = tokio::try_join!(
        state.services.employees.list_by_nucleo(nucleo),
        state.services.equipment.list_by_nucleo(nucleo),
    )?;
    Ok(Json(NucleoDetail {
        nucleo: NucleoInfo::from(nucleo.nucleo()),
        employees,
        equipment,
    }))
}
