//! API handlers for the inventory REST endpoints

pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod equipment;
pub mod health;
pub mod nucleos;
pub mod openapi;
pub mod reference;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};

use crate::{backend::auth::SessionClaims, error::AppError, AppState};

/// Extractor for the signed-in user behind a bearer token
pub struct AuthenticatedUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = state.services.auth.validate(token).await?;
        Ok(AuthenticatedUser(claims))
    }
}

/// Routes mounted under `/api/v1`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        // Employees
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        // Núcleos
        .route("/nucleos", get(nucleos::list_nucleos))
        .route("/nucleos/:id", get(nucleos::get_nucleo))
        // Dashboard and reference data
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/reference", get(reference::get_reference))
}

/// Full application router: API plus Swagger UI
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes())
        .with_state(state)
        .merge(openapi::create_openapi_router())
}
