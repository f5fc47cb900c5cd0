//! Equipment repository

use std::sync::Arc;

use validator::Validate;

use super::{decode, encode, load_page, Entity, Page};
use crate::{
    backend::{server_timestamp, Collection, Direction, DocumentStore, ListQuery},
    error::{AppError, AppResult},
    models::{
        enums::NucleoId,
        equipment::{CreateEquipment, Equipment, UpdateEquipment, EQUIPMENT_SCHEMA},
        schema::{NormalizeMode, Schema},
    },
};

impl Entity for Equipment {
    const COLLECTION: Collection = Collection::Equipments;
    const SCHEMA: Schema = EQUIPMENT_SCHEMA;
    const LABEL: &'static str = "Equipment";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct EquipmentRepository {
    store: Arc<dyn DocumentStore>,
}

impl EquipmentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Base query for the collection
    pub fn query(&self) -> ListQuery {
        ListQuery::new(Collection::Equipments)
    }

    /// Whether another record already uses `serial_number`.
    /// Read-then-write: concurrent writers can still collide.
    async fn serial_taken(&self, serial_number: &str, except_id: Option<&str>) -> AppResult<bool> {
        let docs = self
            .store
            .query(&self.query().where_eq("serialNumber", serial_number))
            .await?;
        Ok(docs.iter().any(|d| Some(d.id.as_str()) != except_id))
    }

    /// Create equipment, returning the new id
    pub async fn add(&self, data: &CreateEquipment) -> AppResult<String> {
        data.validate()?;

        if self.serial_taken(&data.serial_number, None).await? {
            return Err(AppError::DuplicateKey(format!(
                "Serial number '{}' already exists",
                data.serial_number
            )));
        }

        let mut fields = encode(data, &EQUIPMENT_SCHEMA, NormalizeMode::Full)?;
        fields.insert("createdAt".to_string(), server_timestamp());
        fields.insert("updatedAt".to_string(), server_timestamp());

        let id = self.store.insert(Collection::Equipments, fields).await?;
        tracing::info!("Equipment {} created with serial {}", id, data.serial_number);
        Ok(id)
    }

    /// Get equipment by ID; `None` when absent
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Equipment>> {
        self.store
            .get(Collection::Equipments, id)
            .await?
            .map(decode::<Equipment>)
            .transpose()
    }

    /// Partially update equipment
    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<()> {
        data.validate()?;

        if let Some(ref serial) = data.serial_number {
            if self.serial_taken(serial, Some(id)).await? {
                return Err(AppError::DuplicateKey(format!(
                    "Serial number '{}' already belongs to another equipment",
                    serial
                )));
            }
        }

        let mut fields = encode(data, &EQUIPMENT_SCHEMA, NormalizeMode::Present)?;
        fields.insert("updatedAt".to_string(), server_timestamp());

        self.store
            .update(Collection::Equipments, id, fields)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("Equipment {} not found", id)),
                other => other,
            })
    }

    /// Delete equipment. References to it are not touched.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.store.delete(Collection::Equipments, id).await? {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// One page of a listing
    pub async fn list(&self, query: &ListQuery) -> AppResult<Page<Equipment>> {
        load_page(self.store.as_ref(), query).await
    }

    /// Every record ordered by `sort_field`
    pub async fn list_all(&self, sort_field: &str, direction: Direction) -> AppResult<Vec<Equipment>> {
        let query = self.query().order_by(sort_field, direction);
        Ok(self.list(&query).await?.items)
    }

    /// Records of one núcleo ordered by name
    pub async fn list_by_nucleo(&self, nucleo: NucleoId) -> AppResult<Vec<Equipment>> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::{is_server_timestamp, MemoryStore, MockDocumentStore},
        models::enums::{Department, EquipmentStatus, EquipmentType},
    };

    fn new_equipment(serial: &str, name: &str) -> CreateEquipment {
        CreateEquipment {
            serial_number: serial.to_string(),
            equipment_type: EquipmentType::Computador,
            name: name.to_string(),
            status: EquipmentStatus::EmUso,
            model: None,
            manufacturer: Some("Positivo".to_string()),
            ip_address: None,
            nucleo_id: None,
            employee_id: Some(String::new()),
            department_id: Some(Department::try_from("COEN").unwrap()),
            purchase_date: Some(String::new()),
            notes: None,
        }
    }

    fn repo() -> (MemoryStore, EquipmentRepository) {
        let store = MemoryStore::new();
        let repo = EquipmentRepository::new(Arc::new(store.clone()));
        (store, repo)
    }

    #[tokio::test]
    async fn test_add_normalizes_defaults() {
        let (_, repo) = repo();
        let id = repo.add(&new_equipment("SN-001", "Estação 01")).await.unwrap();
        let eq = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(eq.model, "");
        assert_eq!(eq.manufacturer, "Positivo");
        assert_eq!(eq.employee_id, None);
        assert_eq!(eq.purchase_date, None);
        assert!(eq.created_at.ends_with('Z'));
        assert!(eq.updated_at >= eq.created_at);
    }

    #[tokio::test]
    async fn test_duplicate_serial_rejected_without_write() {
        let (store, repo) = repo();
        repo.add(&new_equipment("SN-001", "A")).await.unwrap();
        let err = repo.add(&new_equipment("SN-001", "B")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(store.len(Collection::Equipments).await, 1);
    }

    #[tokio::test]
    async fn test_update_serial_checks_other_records_only() {
        let (_, repo) = repo();
        let a = repo.add(&new_equipment("SN-001", "A")).await.unwrap();
        repo.add(&new_equipment("SN-002", "B")).await.unwrap();

        let same = UpdateEquipment {
            serial_number: Some("SN-001".to_string()),
            ..Default::default()
        };
        repo.update(&a, &same).await.unwrap();

        let taken = UpdateEquipment {
            serial_number: Some("SN-002".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(&a, &taken).await,
            Err(AppError::DuplicateKey(_))
        ));
    }

    #[tokio::test]
    async fn test_clearing_department_writes_null() {
        let (_, repo) = repo();
        let id = repo.add(&new_equipment("SN-001", "A")).await.unwrap();
        let before = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(before.department_id.map(|d| d.as_str()), Some("COEN"));

        let clear = UpdateEquipment {
            department_id: Some(None),
            ..Default::default()
        };
        repo.update(&id, &clear).await.unwrap();
        let after = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(after.department_id, None);
        assert_eq!(after.name, "A");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found_and_leaves_others() {
        let (store, repo) = repo();
        repo.add(&new_equipment("SN-001", "A")).await.unwrap();
        assert!(matches!(repo.delete("missing").await, Err(AppError::NotFound(_))));
        assert_eq!(store.len(Collection::Equipments).await, 1);
    }

    #[tokio::test]
    async fn test_update_always_refreshes_updated_at() {
        let mut store = MockDocumentStore::new();
        store
            .expect_update()
            .withf(|collection, id, fields| {
                *collection == Collection::Equipments
                    && id == "eq-1"
                    && fields.get("updatedAt").map_or(false, is_server_timestamp)
                    && !fields.contains_key("createdAt")
            })
            .times(2)
            .returning(|_, _, _| Ok(()));
        let repo = EquipmentRepository::new(Arc::new(store));

        repo.update("eq-1", &UpdateEquipment::default()).await.unwrap();
        let rename = UpdateEquipment {
            name: Some("Estação 02".to_string()),
            ..Default::default()
        };
        repo.update("eq-1", &rename).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (_, repo) = repo();
        assert!(repo.get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .returning(|_, _| Err(AppError::Transport("unavailable".to_string())));
        let repo = EquipmentRepository::new(Arc::new(store));
        assert!(matches!(
            repo.get_by_id("x").await,
            Err(AppError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_list_all_and_by_nucleo() {
        let (_, repo) = repo();
        let mut data = new_equipment("SN-003", "Charlie");
        data.nucleo_id = Some(NucleoId::try_from("seabra").unwrap());
        repo.add(&data).await.unwrap();
        repo.add(&new_equipment("SN-001", "Alpha")).await.unwrap();
        repo.add(&new_equipment("SN-002", "Bravo")).await.unwrap();

        let names: Vec<_> = repo
            .list_all("name", Direction::Desc)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Charlie", "Bravo", "Alpha"]);

        let seabra = repo
            .list_by_nucleo(NucleoId::try_from("seabra").unwrap())
            .await
            .unwrap();
        assert_eq!(seabra.len(), 1);
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
