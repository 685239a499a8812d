//! Translation of validated bulk payloads into store operations.

use mongodb::bson::{self, Bson, Document};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::ID_FIELD;
use crate::db::FieldUpdate;
use crate::error::{GatewayError, Result};
use crate::validation::JsonObject;

/// Field updates for one bulk update, plus the identifiers they touch.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedUpdates {
    pub ids: Vec<String>,
    pub updates: Vec<FieldUpdate>,
}

fn to_document(record: &JsonObject) -> Result<Document> {
    bson::to_document(record)
        .map_err(|e| GatewayError::validation(format!("Invalid value for payload. {}", e)))
}

/// Converts a stored document into plain JSON for responses.
pub fn to_json(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

/// Builds the documents to insert. Each one gets a fresh v4 identifier,
/// replacing any identifier supplied by the client.
pub fn prepare_inserts(records: Vec<JsonObject>) -> Result<Vec<Document>> {
    records
        .into_iter()
        .map(|mut record| {
            record.remove(ID_FIELD);
            let mut document = Document::new();
            document.insert(ID_FIELD, Uuid::new_v4().to_string());
            for (key, value) in to_document(&record)? {
                document.insert(key, value);
            }
            Ok(document)
        })
        .collect()
}

/// Builds one field-level update per record. The identifier is only used as
/// the lookup key and never appears in the update set.
///
/// Records must already have passed identifier validation.
pub fn prepare_updates(records: Vec<JsonObject>) -> Result<PreparedUpdates> {
    let mut ids = Vec::with_capacity(records.len());
    let mut updates = Vec::with_capacity(records.len());

    for mut record in records {
        let id = match record.remove(ID_FIELD) {
            Some(Value::String(id)) if !id.is_empty() => id,
            _ => {
                return Err(GatewayError::validation(format!(
                    "{} cannot be empty.",
                    ID_FIELD
                )))
            }
        };

        updates.push(FieldUpdate {
            id: id.clone(),
            fields: to_document(&record)?,
        });
        ids.push(id);
    }

    Ok(PreparedUpdates { ids, updates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn records(value: Value) -> Vec<JsonObject> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| item.as_object().cloned().unwrap())
                .collect(),
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn test_inserts_get_fresh_distinct_ids() {
        let docs = prepare_inserts(records(json!([
            { "name": "a" },
            { "name": "b", "_id": "client-chosen" },
            { "name": "c" }
        ])))
        .unwrap();

        let ids: HashSet<&str> = docs.iter().map(|d| d.get_str("_id").unwrap()).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains("client-chosen"));
        for id in ids {
            assert_eq!(Uuid::parse_str(id).unwrap().get_version_num(), 4);
        }
        assert_eq!(docs[1].get_str("name").unwrap(), "b");
    }

    #[test]
    fn test_updates_strip_identifier() {
        let prepared = prepare_updates(records(json!([
            { "_id": "one", "name": "first", "nested": { "k": true } },
            { "_id": "two" }
        ])))
        .unwrap();

        assert_eq!(prepared.ids, vec!["one", "two"]);
        assert_eq!(prepared.updates[0].id, "one");
        assert!(!prepared.updates[0].fields.contains_key("_id"));
        assert_eq!(prepared.updates[0].fields.get_str("name").unwrap(), "first");
        assert!(prepared.updates[1].fields.is_empty());
    }

    #[test]
    fn test_to_json_is_plain() {
        let docs = prepare_inserts(records(json!([{ "count": 3, "tags": ["x"] }]))).unwrap();
        let value = to_json(docs[0].clone());
        assert_eq!(value["count"], 3);
        assert_eq!(value["tags"], json!(["x"]));
        assert!(value["_id"].is_string());
    }
}
