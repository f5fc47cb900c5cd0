//! Dashboard summaries

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::equipment::Equipment;

/// One line of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub description: String,
    /// Local date, dd/mm/yyyy
    pub date: String,
}

/// Aggregate view shown on the dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub equipment_count: usize,
    pub employee_count: usize,
    /// Keys sorted alphabetically
    #[schema(value_type = Object)]
    pub by_type: BTreeMap<String, usize>,
    /// Keys in first-seen order
    #[schema(value_type = Object)]
    pub by_status: IndexMap<String, usize>,
    #[schema(value_type = Object)]
    pub by_department: BTreeMap<String, usize>,
    pub recent_activity: Vec<ActivityEntry>,
}

/// Records sharing one status, for the status drill-down
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusGroup {
    pub status: String,
    pub items: Vec<Equipment>,
}
