//! Employees service

use async_trait::async_trait;

use super::{guard, EntitySource};
use crate::{
    backend::{Direction, ListQuery},
    config::ListingConfig,
    error::{AppError, AppResult},
    models::{
        employee::{CreateEmployee, Employee, UpdateEmployee},
        enums::NucleoId,
        ListParams,
    },
    repository::{query_from_params, Page, Repository},
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
    listing: ListingConfig,
}

impl EmployeesService {
    pub fn new(repository: Repository, listing: ListingConfig) -> Self {
        Self { repository, listing }
    }

    pub fn page_size(&self) -> usize {
        self.listing.page_size
    }

    pub async fn add(&self, data: &CreateEmployee) -> AppResult<String> {
        guard(self.repository.employees.add(data).await, "add employee")
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Employee>> {
        guard(self.repository.employees.get_by_id(id).await, "load employee")
    }

    pub async fn get(&self, id: &str) -> AppResult<Employee> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    pub async fn update(&self, id: &str, data: &UpdateEmployee) -> AppResult<()> {
        guard(self.repository.employees.update(id, data).await, "update employee")
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        guard(self.repository.employees.delete(id).await, "delete employee")
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Page<Employee>> {
        guard(self.repository.employees.list(query).await, "load employees")
    }

    pub async fn list_all(&self, sort_field: &str, direction: Direction) -> AppResult<Vec<Employee>> {
        guard(
            self.repository.employees.list_all(sort_field, direction).await,
            "load employees",
        )
    }

    pub async fn list_by_nucleo(&self, nucleo: NucleoId) -> AppResult<Vec<Employee>> {
        guard(
            self.repository.employees.list_by_nucleo(nucleo).await,
            "load employees",
        )
    }

    pub async fn count(&self) -> AppResult<usize> {
        guard(self.repository.employees.count().await, "count employees")
    }

    /// Build a page query from listing parameters
    pub async fn query_from_params(&self, params: &ListParams) -> AppResult<ListQuery> {
        guard(
            query_from_params::<Employee>(self.repository.store.as_ref(), params, self.listing.page_size).await,
            "load employees",
        )
    }
}

#[async_trait]
impl EntitySource<Employee> for EmployeesService {
    type Create = CreateEmployee;
    type Update = UpdateEmployee;

    fn base_query(&self) -> ListQuery {
        self.repository.employees.query().order_by("name", Direction::Asc)
    }

    async fn fetch(&self, query: &ListQuery) -> AppResult<Page<Employee>> {
        self.list(query).await
    }

    async fn get(&self, id: &str) -> AppResult<Option<Employee>> {
        self.get_by_id(id).await
    }

    async fn add(&self, data: &CreateEmployee) -> AppResult<String> {
        EmployeesService::add(self, data).await
    }

    async fn update(&self, id: &str, data: &UpdateEmployee) -> AppResult<()> {
        EmployeesService::update(self, id, data).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        EmployeesService::delete(self, id).await
    }
}
