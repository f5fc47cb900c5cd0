//! In-process document store

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use rand::{distributions::Alphanumeric, Rng};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{
    is_server_timestamp, Collection, Cursor, Direction, Document, DocumentStore, Fields,
    ListQuery, Timestamp,
};
use crate::error::{AppError, AppResult};

const ID_LENGTH: usize = 20;

/// Document store held in memory, used in development and tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, IndexMap<String, Fields>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(IndexMap::len)
            .unwrap_or(0)
    }

    fn generate_id() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ID_LENGTH)
            .map(char::from)
            .collect()
    }

    fn resolve_server_values(fields: &mut Fields) {
        let now = Timestamp::now().to_value();
        for value in fields.values_mut() {
            if is_server_timestamp(value) {
                *value = now.clone();
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, mut fields: Fields) -> AppResult<String> {
        Self::resolve_server_values(&mut fields);
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        let mut id = Self::generate_id();
        while docs.contains_key(&id) {
            id = Self::generate_id();
        }
        docs.insert(id.clone(), fields);
        Ok(id)
    }

    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn query(&self, query: &ListQuery) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Document> = docs
            .iter()
            .filter(|(_, fields)| {
                query
                    .filters
                    .iter()
                    .all(|f| fields.get(&f.field).unwrap_or(&Value::Null) == &f.value)
            })
            .map(|(id, fields)| Document {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect();

        matched.sort_by(|a, b| {
            let ka = query.cursor_for(a);
            let kb = query.cursor_for(b);
            position_cmp(query, &ka, &kb)
        });

        if let Some(ref after) = query.start_after {
            matched.retain(|doc| position_cmp(query, &query.cursor_for(doc), after) == Ordering::Greater);
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }

    async fn update(&self, collection: Collection, id: &str, mut fields: Fields) -> AppResult<()> {
        Self::resolve_server_values(&mut fields);
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| AppError::NotFound(format!("No document {} in {}", id, collection)))?;
        for (key, value) in fields {
            doc.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&collection)
            .and_then(|docs| docs.shift_remove(id))
            .is_some())
    }
}

/// Order two positions under the query's sort, ties broken by id
fn position_cmp(query: &ListQuery, a: &Cursor, b: &Cursor) -> Ordering {
    let ord = compare_values(&a.sort_value, &b.sort_value).then_with(|| a.id.cmp(&b.id));
    match query.order_by.as_ref().map(|o| o.direction) {
        Some(Direction::Desc) => ord.reverse(),
        _ => ord,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::Object(_) if Timestamp::from_value(value).is_some() => 3,
        Value::String(_) => 4,
        Value::Array(_) => 5,
        Value::Object(_) => 6,
    }
}

/// Total order over field values: null < bool < number < timestamp < string < other
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ if ra == 3 => Timestamp::from_value(a).cmp(&Timestamp::from_value(b)),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server_timestamp;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    async fn seed(store: &MemoryStore, names: &[&str]) {
        for (i, name) in names.iter().enumerate() {
            let nucleo = if i % 2 == 0 { "salvador" } else { "irece" };
            store
                .insert(
                    Collection::Equipments,
                    fields(&[("name", json!(name)), ("nucleoId", json!(nucleo))]),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_insert_generates_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert(Collection::Employees, Fields::new()).await.unwrap();
        let b = store.insert(Collection::Employees, Fields::new()).await.unwrap();
        assert_eq!(a.len(), ID_LENGTH);
        assert_ne!(a, b);
        assert_eq!(store.len(Collection::Employees).await, 2);
        assert_eq!(store.len(Collection::Equipments).await, 0);
    }

    #[tokio::test]
    async fn test_server_timestamp_resolved_on_write() {
        let store = MemoryStore::new();
        let id = store
            .insert(
                Collection::Equipments,
                fields(&[("createdAt", server_timestamp())]),
            )
            .await
            .unwrap();
        let doc = store.get(Collection::Equipments, &id).await.unwrap().unwrap();
        assert!(Timestamp::from_value(doc.field("createdAt")).is_some());
    }

    #[tokio::test]
    async fn test_query_orders_and_filters() {
        let store = MemoryStore::new();
        seed(&store, &["delta", "alpha", "echo", "charlie", "bravo"]).await;

        let all = store
            .query(&ListQuery::new(Collection::Equipments).order_by("name", Direction::Asc))
            .await
            .unwrap();
        let names: Vec<_> = all.iter().map(|d| d.field("name").as_str().unwrap()).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie", "delta", "echo"]);

        let desc = store
            .query(&ListQuery::new(Collection::Equipments).order_by("name", Direction::Desc))
            .await
            .unwrap();
        assert_eq!(desc[0].field("name"), &json!("echo"));

        let salvador = store
            .query(
                &ListQuery::new(Collection::Equipments)
                    .where_eq("nucleoId", "salvador")
                    .order_by("name", Direction::Asc),
            )
            .await
            .unwrap();
        let names: Vec<_> = salvador.iter().map(|d| d.field("name").as_str().unwrap()).collect();
        assert_eq!(names, vec!["bravo", "delta", "echo"]);
    }

    #[tokio::test]
    async fn test_start_after_pages_without_overlap() {
        let store = MemoryStore::new();
        seed(&store, &["a", "b", "c", "d", "e"]).await;
        let base = ListQuery::new(Collection::Equipments)
            .order_by("name", Direction::Asc)
            .limit(Some(2));

        let mut seen = Vec::new();
        let mut cursor = None;
        loop {
            let page = store.query(&base.clone().start_after(cursor.clone())).await.unwrap();
            if page.is_empty() {
                break;
            }
            cursor = page.last().map(|d| base.cursor_for(d));
            seen.extend(page.into_iter().map(|d| d.id));
        }
        assert_eq!(seen.len(), 5);
        let unique: std::collections::HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_delete_reports_existence() {
        let store = MemoryStore::new();
        let err = store
            .update(Collection::Equipments, "missing", Fields::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let id = store.insert(Collection::Equipments, Fields::new()).await.unwrap();
        assert!(store.delete(Collection::Equipments, &id).await.unwrap());
        assert!(!store.delete(Collection::Equipments, &id).await.unwrap());
    }

    #[test]
    fn test_compare_values_type_order() {
        let ts = Timestamp { seconds: 5, nanoseconds: 0 }.to_value();
        let mut values = vec![json!("b"), ts.clone(), json!(3), Value::Null, json!(true), json!("a")];
        values.sort_by(compare_values);
        assert_eq!(values, vec![Value::Null, json!(true), json!(3), ts, json!("a"), json!("b")]);
    }
}
