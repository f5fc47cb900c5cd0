//! Repository layer translating domain operations into document store calls

pub mod employees;
pub mod equipment;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    backend::{Collection, Cursor, Document, DocumentStore, Fields, ListQuery},
    error::{AppError, AppResult},
    models::{
        enums::NucleoId,
        schema::{normalize, NormalizeMode, Schema},
        ListParams,
    },
};

/// A record type stored in its own collection
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
    const SCHEMA: Schema;
    /// Human label used in messages
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

/// One fetched page and the position of its last record
#[derive(Debug, Clone)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub cursor: Option<Cursor>,
}

/// Turn a stored document into a typed record
pub fn decode<E: Entity>(doc: Document) -> AppResult<E> {
    let Document { id, mut fields } = doc;
    normalize(&mut fields, &E::SCHEMA, NormalizeMode::Full);
    fields.insert("id".to_string(), Value::String(id.clone()));
    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        AppError::Internal(format!("Malformed {} document {}: {}", E::COLLECTION, id, e))
    })
}

/// Serialize a request body into canonical document fields
pub fn encode<T: Serialize>(data: &T, schema: &Schema, mode: NormalizeMode) -> AppResult<Fields> {
    let mut fields = match serde_json::to_value(data) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            return Err(AppError::Internal(format!(
                "Expected an object body, got {}",
                other
            )))
        }
        Err(e) => return Err(AppError::Internal(format!("Failed to encode body: {}", e))),
    };
    fields.remove("id");
    normalize(&mut fields, schema, mode);
    Ok(fields)
}

/// Run a list query and decode its results. Undecodable documents are skipped.
pub async fn load_page<E: Entity>(store: &dyn DocumentStore, query: &ListQuery) -> AppResult<Page<E>> {
    let docs = store.query(query).await?;
    let cursor = docs.last().map(|d| query.cursor_for(d));
    let items = docs
        .into_iter()
        .filter_map(|doc| match decode::<E>(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping record: {}", e);
                None
            }
        })
        .collect();
    Ok(Page { items, cursor })
}

/// Cursor for the record `id` under `query`'s ordering
pub async fn cursor_at(store: &dyn DocumentStore, query: &ListQuery, id: &str) -> AppResult<Cursor> {
    store
        .get(query.collection, id)
        .await?
        .map(|doc| query.cursor_for(&doc))
        .ok_or_else(|| AppError::NotFound(format!("Cursor record {} not found", id)))
}

/// Page query for `E` built from listing parameters. Ordered by name unless
/// `sort` says otherwise; a `start_after` id is resolved to a cursor.
pub async fn query_from_params<E: Entity>(
    store: &dyn DocumentStore,
    params: &ListParams,
    default_limit: usize,
) -> AppResult<ListQuery> {
    let mut query = ListQuery::new(E::COLLECTION).order_by(
        params.sort.as_deref().unwrap_or("name"),
        params.order.unwrap_or_default(),
    );
    if let Some(ref nucleo) = params.nucleo_id {
        query = query.where_eq("nucleoId", NucleoId::try_from(nucleo.as_str())?.as_str());
    }
    if let Some(ref after) = params.start_after {
        let cursor = cursor_at(store, &query, after).await?;
        query = query.start_after(Some(cursor));
    }
    Ok(query.limit(Some(params.limit.unwrap_or(default_limit))))
}

/// Main repository struct holding the document store
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn DocumentStore>,
    pub equipment: equipment::EquipmentRepository,
    pub employees: employees::EmployeesRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(store.clone()),
            employees: employees::EmployeesRepository::new(store.clone()),
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::{
        backend::{Direction, MemoryStore},
        models::employee::Employee,
    };

    #[tokio::test]
    async fn test_query_from_params_targets_entity_collection() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for name in ["Ana", "Bruno", "Carla"] {
            let mut fields = Fields::new();
            fields.insert("name".to_string(), json!(name));
            ids.push(store.insert(Collection::Employees, fields).await.unwrap());
        }

        let params = ListParams {
            start_after: Some(ids[2].clone()),
            limit: Some(1),
            order: Some(Direction::Desc),
            ..Default::default()
        };
        let query = query_from_params::<Employee>(&store, &params, 20).await.unwrap();
        assert_eq!(query.collection, Collection::Employees);
        assert_eq!(query.limit, Some(1));

        let page = store.query(&query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].field("name"), &json!("Bruno"));

        let missing = ListParams {
            start_after: Some("gone".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query_from_params::<Employee>(&store, &missing, 20).await,
            Err(AppError::NotFound(_))
        ));
    }
}
