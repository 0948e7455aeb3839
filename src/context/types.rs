use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Conversation or contact snapshot supplied by the host.
///
/// The record is opaque: it is embedded verbatim into request bodies and only
/// its `id` field is ever inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextRecord(Map<String, Value>);

impl ContextRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from an arbitrary JSON value. Only objects qualify.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Textual id of the record. Numeric ids use their JSON form; any other
    /// type counts as absent.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Immutable pair of context snapshots threaded into every request build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub conversation: Option<ContextRecord>,
    pub contact: Option<ContextRecord>,
}

impl SessionContext {
    pub fn new(conversation: Option<ContextRecord>, contact: Option<ContextRecord>) -> Self {
        Self {
            conversation,
            contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ContextRecord {
        ContextRecord::from_value(value).unwrap()
    }

    #[test]
    fn string_id() {
        assert_eq!(record(json!({"id": "c1"})).id().as_deref(), Some("c1"));
    }

    #[test]
    fn numeric_id_uses_json_text() {
        assert_eq!(record(json!({"id": 42})).id().as_deref(), Some("42"));
    }

    #[test]
    fn missing_or_odd_id_is_absent() {
        assert!(record(json!({"name": "x"})).id().is_none());
        assert!(record(json!({"id": null})).id().is_none());
        assert!(record(json!({"id": ["a"]})).id().is_none());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(ContextRecord::from_value(json!("c1")).is_none());
        assert!(ContextRecord::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn serializes_verbatim() {
        let rec = record(json!({"id": "c1", "tags": ["vip"], "open": true}));
        let out = serde_json::to_value(&rec).unwrap();
        assert_eq!(out, json!({"id": "c1", "tags": ["vip"], "open": true}));
    }
}
