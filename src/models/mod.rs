//! Data models for the inventory

pub mod dashboard;
pub mod employee;
pub mod enums;
pub mod equipment;
pub mod schema;
pub mod search;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::backend::Direction;

// Re-export commonly used types
pub use dashboard::{ActivityEntry, DashboardSummary, StatusGroup};
pub use employee::{CreateEmployee, Employee, UpdateEmployee};
pub use enums::{Department, EquipmentStatus, EquipmentType, Nucleo, NucleoId, UserRole};
pub use equipment::{CreateEquipment, Equipment, UpdateEquipment};

/// Query parameters for equipment and employee listings
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Restrict to one núcleo
    pub nucleo_id: Option<String>,
    /// Id of the last record of the previous page
    pub start_after: Option<String>,
    /// Page size
    pub limit: Option<usize>,
    /// Sort field (defaults to `name`)
    pub sort: Option<String>,
    pub order: Option<Direction>,
}
