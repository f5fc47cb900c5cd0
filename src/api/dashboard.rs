//! Dashboard endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::dashboard::{DashboardSummary, StatusGroup},
    AppState,
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    /// Equipment grouped by status, for the drill-down view
    pub status_groups: Vec<StatusGroup>,
}

/// Counts and recent activity over all equipment
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 502, description = "Backend unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardResponse>> {
    let (summary, status_groups) = state.services.dashboard.snapshot().await?;
    Ok(Json(DashboardResponse {
        summary,
        status_groups,
    }))
}
