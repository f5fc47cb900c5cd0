//! Canonical document shape
//!
//! Backend documents may carry optional fields as absent, `null` or `""`.
//! [`normalize`] maps them to one representation: text fields become `""`,
//! nullable references become `null`, and stored timestamps become ISO-8601
//! strings. It runs on every read and before every write.

use serde_json::Value;

use crate::backend::{Fields, Timestamp};

/// Field classes of an entity collection
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Optional free text, canonical empty value `""`
    pub text_fields: &'static [&'static str],
    /// Nullable references and dates, canonical empty value `null`
    pub nullable_fields: &'static [&'static str],
    /// Server-assigned timestamps
    pub timestamp_fields: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Fill every missing field (reads and inserts)
    Full,
    /// Touch only keys already present (partial updates)
    Present,
}

pub fn normalize(fields: &mut Fields, schema: &Schema, mode: NormalizeMode) {
    for &name in schema.text_fields {
        match fields.get_mut(name) {
            Some(value) if value.is_null() => *value = Value::String(String::new()),
            Some(_) => {}
            None if mode == NormalizeMode::Full => {
                fields.insert(name.to_string(), Value::String(String::new()));
            }
            None => {}
        }
    }

    for &name in schema.nullable_fields {
        match fields.get_mut(name) {
            Some(value) => {
                if value.as_str().is_some_and(|s| s.trim().is_empty()) {
                    *value = Value::Null;
                }
            }
            None if mode == NormalizeMode::Full => {
                fields.insert(name.to_string(), Value::Null);
            }
            None => {}
        }
    }

    for &name in schema.timestamp_fields {
        if let Some(value) = fields.get_mut(name) {
            if let Some(iso) = Timestamp::from_value(value).and_then(|ts| ts.to_iso()) {
                *value = Value::String(iso);
            }
        }
    }
}
