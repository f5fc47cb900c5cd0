//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, dashboard, employees, equipment, health, nucleos, reference};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventário API",
        version = "1.0.0",
        description = "Equipment and employee inventory REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Núcleos
        nucleos::list_nucleos,
        nucleos::get_nucleo,
        // Dashboard
        dashboard::get_dashboard,
        // Reference
        reference::get_reference,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::EquipmentPage,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            employees::EmployeePage,
            // Núcleos
            nucleos::NucleoInfo,
            nucleos::NucleoDetail,
            // Dashboard
            crate::models::dashboard::DashboardSummary,
            crate::models::dashboard::ActivityEntry,
            crate::models::dashboard::StatusGroup,
            dashboard::DashboardResponse,
            // Reference
            reference::ReferenceData,
            crate::models::enums::EquipmentType,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::UserRole,
            crate::models::enums::Department,
            crate::models::enums::NucleoId,
            crate::backend::Direction,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment management"),
        (name = "employees", description = "Employee management"),
        (name = "nucleos", description = "Regional units"),
        (name = "dashboard", description = "Aggregate counts and recent activity"),
        (name = "reference", description = "Fixed reference lists")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
