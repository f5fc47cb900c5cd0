//! Remote data service boundary
//!
//! The hosted document database and authentication service are reached only
//! through the [`DocumentStore`] and [`auth::AuthProvider`] traits. Documents are
//! schemaless JSON field maps; typing happens in [`crate::models`].

pub mod auth;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::error::AppResult;

pub use memory::MemoryStore;

/// Raw document body
pub type Fields = serde_json::Map<String, Value>;

/// Collections known to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Equipments,
    Employees,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Equipments => "equipments",
            Collection::Employees => "employees",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored document with its backend-assigned identity
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    /// Field value, `Null` when absent
    pub fn field(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Equality constraint on a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// Position of the last record seen, for `startAfter` pagination.
/// Carries the sort value so the store can resume without re-reading the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub id: String,
    pub sort_value: Value,
}

/// Filtered, ordered, paginated read consumed by [`DocumentStore::query`]
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub collection: Collection,
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<OrderBy>,
    pub start_after: Option<Cursor>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            order_by: None,
            start_after: None,
            limit: None,
        }
    }

    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn start_after(mut self, cursor: Option<Cursor>) -> Self {
        self.start_after = cursor;
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Cursor pointing at `doc` under this query's ordering
    pub fn cursor_for(&self, doc: &Document) -> Cursor {
        let sort_value = self
            .order_by
            .as_ref()
            .map(|o| doc.field(&o.field).clone())
            .unwrap_or(Value::Null);
        Cursor {
            id: doc.id.clone(),
            sort_value,
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

const SERVER_VALUE_KEY: &str = ".sv";

/// Write sentinel replaced by the store with its own clock
pub fn server_timestamp() -> Value {
    json!({ SERVER_VALUE_KEY: "timestamp" })
}

pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|o| o.get(SERVER_VALUE_KEY))
        .and_then(Value::as_str)
        == Some("timestamp")
}

/// Stored timestamp representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanoseconds: dt.timestamp_subsec_nanos(),
        }
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.nanoseconds).single()
    }

    /// Parse the stored representation; any other value yields `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        if obj.len() != 2 {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_value(&self) -> Value {
        json!({ "seconds": self.seconds, "nanoseconds": self.nanoseconds })
    }

    /// ISO-8601 in UTC with millisecond precision
    pub fn to_iso(&self) -> Option<String> {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Collection-scoped document database
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert with a generated id; returns the id
    async fn insert(&self, collection: Collection, fields: Fields) -> AppResult<String>;

    async fn get(&self, collection: Collection, id: &str) -> AppResult<Option<Document>>;

    async fn query(&self, query: &ListQuery) -> AppResult<Vec<Document>>;

    /// Merge `fields` into an existing document. Missing documents are `NotFound`.
    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> AppResult<()>;

    /// Remove a document; returns whether it existed
    async fn delete(&self, collection: Collection, id: &str) -> AppResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_iso() {
        let ts = Timestamp {
            seconds: 1_700_000_000,
            nanoseconds: 123_000_000,
        };
        assert_eq!(ts.to_iso().unwrap(), "2023-11-14T22:13:20.123Z");
        assert_eq!(Timestamp::from_value(&ts.to_value()), Some(ts));
    }

    #[test]
    fn test_timestamp_from_other_values() {
        assert_eq!(Timestamp::from_value(&json!("2023-11-14")), None);
        assert_eq!(Timestamp::from_value(&json!({"seconds": 1})), None);
        assert_eq!(Timestamp::from_value(&server_timestamp()), None);
    }

    #[test]
    fn test_cursor_for_uses_sort_field() {
        let query = ListQuery::new(Collection::Equipments).order_by("name", Direction::Asc);
        let mut fields = Fields::new();
        fields.insert("name".into(), json!("Impressora HP"));
        let doc = Document {
            id: "abc".into(),
            fields,
        };
        let cursor = query.cursor_for(&doc);
        assert_eq!(cursor.id, "abc");
        assert_eq!(cursor.sort_value, json!("Impressora HP"));
    }
}
