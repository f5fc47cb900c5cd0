//! Equipment service

use async_trait::async_trait;

use super::{guard, EntitySource};
use crate::{
    backend::{Direction, ListQuery},
    config::ListingConfig,
    error::{AppError, AppResult},
    models::{
        enums::NucleoId,
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        ListParams,
    },
    repository::{query_from_params, Page, Repository},
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    listing: ListingConfig,
}

impl EquipmentService {
    pub fn new(repository: Repository, listing: ListingConfig) -> Self {
        Self { repository, listing }
    }

    pub fn page_size(&self) -> usize {
        self.listing.page_size
    }

    pub async fn add(&self, data: &CreateEquipment) -> AppResult<String> {
        guard(self.repository.equipment.add(data).await, "add equipment")
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Equipment>> {
        guard(self.repository.equipment.get_by_id(id).await, "load equipment")
    }

    /// Like [`get_by_id`](Self::get_by_id) but absence is an error
    pub async fn get(&self, id: &str) -> AppResult<Equipment> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<()> {
        guard(self.repository.equipment.update(id, data).await, "update equipment")
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        guard(self.repository.equipment.delete(id).await, "delete equipment")
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Page<Equipment>> {
        guard(self.repository.equipment.list(query).await, "load equipment")
    }

    pub async fn list_all(&self, sort_field: &str, direction: Direction) -> AppResult<Vec<Equipment>> {
        guard(
            self.repository.equipment.list_all(sort_field, direction).await,
            "load equipment",
        )
    }

    pub async fn list_by_nucleo(&self, nucleo: NucleoId) -> AppResult<Vec<Equipment>> {
        guard(
            self.repository.equipment.list_by_nucleo(nucleo).await,
            "load equipment",
        )
    }

    pub async fn count(&self) -> AppResult<usize> {
        guard(self.repository.equipment.count().await, "count equipment")
    }

    /// Build a page query from listing parameters
    pub async fn query_from_params(&self, params: &ListParams) -> AppResult<ListQuery> {
        guard(
            query_from_params::<Equipment>(self.repository.store.as_ref(), params, self.listing.page_size).await,
            "load equipment",
        )
    }
}

#[async_trait]
impl EntitySource<Equipment> for EquipmentService {
    type Create = CreateEquipment;
    type Update = UpdateEquipment;

    fn base_query(&self) -> ListQuery {
        self.repository.equipment.query().order_by("name", Direction::Asc)
    }

    async fn fetch(&self, query: &ListQuery) -> AppResult<Page<Equipment>> {
        self.list(query).await
    }

    async fn get(&self, id: &str) -> AppResult<Option<Equipment>> {
        self.get_by_id(id).await
    }

    async fn add(&self, data: &CreateEquipment) -> AppResult<String> {
        EquipmentService::add(self, data).await
    }

    async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<()> {
        EquipmentService::update(self, id, data).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        EquipmentService::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::backend::{MemoryStore, MockDocumentStore};
    use crate::models::enums::{EquipmentStatus, EquipmentType};

    fn create(serial: &str) -> CreateEquipment {
        CreateEquipment {
            serial_number: serial.to_string(),
            equipment_type: EquipmentType::Impressora,
            name: format!("Impressora {}", serial),
            status: EquipmentStatus::Disponivel,
            model: None,
            manufacturer: None,
            ip_address: None,
            nucleo_id: None,
            employee_id: None,
            department_id: None,
            purchase_date: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_generic_message() {
        let mut store = MockDocumentStore::new();
        store
            .expect_query()
            .returning(|_| Err(AppError::Transport("permission denied".to_string())));
        let service = EquipmentService::new(
            Repository::new(Arc::new(store)),
            ListingConfig::default(),
        );
        match service.add(&create("SN-9")).await {
            Err(AppError::Transport(msg)) => assert_eq!(msg, "Failed to add equipment"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_from_params_resolves_cursor() {
        let service = EquipmentService::new(
            Repository::new(Arc::new(MemoryStore::new())),
            ListingConfig { page_size: 2 },
        );
        let first = service.add(&create("SN-1")).await.unwrap();
        service.add(&create("SN-2")).await.unwrap();
        service.add(&create("SN-3")).await.unwrap();

        let params = ListParams {
            start_after: Some(first),
            ..Default::default()
        };
        let query = service.query_from_params(&params).await.unwrap();
        let page = service.list(&query).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Impressora SN-2", "Impressora SN-3"]);
    }

    #[tokio::test]
    async fn test_query_from_params_rejects_unknown_nucleo() {
        let service = EquipmentService::new(
            Repository::new(Arc::new(MemoryStore::new())),
            ListingConfig::default(),
        );
        let params = ListParams {
            nucleo_id: Some("atlantida".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.query_from_params(&params).await,
            Err(AppError::Validation(_))
        ));
    }
}
