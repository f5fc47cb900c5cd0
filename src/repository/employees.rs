//! Employees repository

use std::sync::Arc;

use validator::Validate;

use super::{decode, encode, load_page, Entity, Page};
use crate::{
    backend::{server_timestamp, Collection, Direction, DocumentStore, ListQuery},
    error::{AppError, AppResult},
    models::{
        employee::{CreateEmployee, Employee, UpdateEmployee, EMPLOYEE_SCHEMA},
        enums::NucleoId,
        schema::{NormalizeMode, Schema},
    },
};

impl Entity for Employee {
    const COLLECTION: Collection = Collection::Employees;
    const SCHEMA: Schema = EMPLOYEE_SCHEMA;
    const LABEL: &'static str = "Employee";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct EmployeesRepository {
    store: Arc<dyn DocumentStore>,
}

impl EmployeesRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn query(&self) -> ListQuery {
        ListQuery::new(Collection::Employees)
    }

    pub async fn add(&self, data: &CreateEmployee) -> AppResult<String> {
        data.validate()?;

        let mut fields = encode(data, &EMPLOYEE_SCHEMA, NormalizeMode::Full)?;
        fields.insert("createdAt".to_string(), server_timestamp());
        fields.insert("updatedAt".to_string(), server_timestamp());

        let id = self.store.insert(Collection::Employees, fields).await?;
        tracing::info!("Employee {} created", id);
        Ok(id)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Employee>> {
        self.store
            .get(Collection::Employees, id)
            .await?
            .map(decode::<Employee>)
            .transpose()
    }

    /// Partially update an employee. A cleared department or núcleo is stored
    /// as `null` and a cleared network username as `""`.
    pub async fn update(&self, id: &str, data: &UpdateEmployee) -> AppResult<()> {
        data.validate()?;

        let mut fields = encode(data, &EMPLOYEE_SCHEMA, NormalizeMode::Present)?;
        fields.insert("updatedAt".to_string(), server_timestamp());

        self.store
            .update(Collection::Employees, id, fields)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("Employee {} not found", id)),
                other => other,
            })
    }

    /// Delete an employee. Equipment still pointing at it keeps the dangling id.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.store.delete(Collection::Employees, id).await? {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }
        Ok(())
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Page<Employee>> {
        load_page(self.store.as_ref(), query).await
    }

    pub async fn list_all(&self, sort_field: &str, direction: Direction) -> AppResult<Vec<Employee>> {
        let query = self.query().order_by(sort_field, direction);
        Ok(self.list(&query).await?.items)
    }

    pub async fn list_by_nucleo(&self, nucleo: NucleoId) -> AppResult<Vec<Employee>> {
        let query = self
            .query()
            .where_eq("nucleoId", nucleo.as_str())
            .order_by("name", Direction::Asc);
        Ok(self.list(&query).await?.items)
    }

    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.store.query(&self.query()).await?.len())
    }
}
