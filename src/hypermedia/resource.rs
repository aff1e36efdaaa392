//! Hypermedia resources

use super::link::Relations;
use crate::types::JsonObject;
use serde_json::Value;
use url::Url;

/// A parsed resource: its fields plus the relations found among them
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    fields: JsonObject,
    rels: Relations,
}

impl Resource {
    /// Build from a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: &Value, base: Option<&Url>) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::from_object(fields.clone(), base)),
            _ => None,
        }
    }

    /// Build from a JSON object
    pub fn from_object(fields: JsonObject, base: Option<&Url>) -> Self {
        let rels = Relations::from_fields(&fields, base);
        Self { fields, rels }
    }

    /// Field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &JsonObject {
        &self.fields
    }

    pub fn rels(&self) -> &Relations {
        &self.rels
    }

    /// Back to plain JSON
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
