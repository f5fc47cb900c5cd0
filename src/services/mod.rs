//! Business logic services

pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod equipment;

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::{
    backend::{auth::AuthProvider, ListQuery},
    config::ListingConfig,
    error::{AppError, AppResult},
    repository::{Entity, Page, Repository},
};

/// Data access used by list and form controllers
#[async_trait]
pub trait EntitySource<E: Entity>: Send + Sync {
    type Create: Validate + Send + Sync;
    type Update: Validate + Send + Sync;

    /// Collection query with the listing's default ordering
    fn base_query(&self) -> ListQuery;

    async fn fetch(&self, query: &ListQuery) -> AppResult<Page<E>>;

    async fn get(&self, id: &str) -> AppResult<Option<E>>;

    async fn add(&self, data: &Self::Create) -> AppResult<String>;

    async fn update(&self, id: &str, data: &Self::Update) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Apply the failure policy: domain errors pass through, anything else is
/// logged and replaced by a generic user-facing message.
pub(crate) fn guard<T>(result: AppResult<T>, action: &str) -> AppResult<T> {
    result.map_err(|e| {
        if e.is_domain() {
            e
        } else {
            tracing::error!("Failed to {}: {}", action, e);
            AppError::Transport(format!("Failed to {}", action))
        }
    })
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub employees: employees::EmployeesService,
    pub dashboard: dashboard::DashboardService,
    pub auth: auth::AuthService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_provider: Arc<dyn AuthProvider>,
        listing: ListingConfig,
    ) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone(), listing.clone()),
            employees: employees::EmployeesService::new(repository.clone(), listing),
            dashboard: dashboard::DashboardService::new(repository),
            auth: auth::AuthService::new(auth_provider),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_passes_domain_errors() {
        let dup: AppResult<()> = Err(AppError::DuplicateKey("taken".into()));
        assert!(matches!(guard(dup, "add equipment"), Err(AppError::DuplicateKey(_))));

        let missing: AppResult<()> = Err(AppError::NotFound("x".into()));
        assert!(matches!(guard(missing, "delete equipment"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_guard_wraps_backend_failures() {
        let down: AppResult<()> = Err(AppError::Transport("connection reset".into()));
        match guard(down, "add equipment") {
            Err(AppError::Transport(msg)) => assert_eq!(msg, "Failed to add equipment"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
