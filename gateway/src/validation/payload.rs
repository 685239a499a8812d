use serde_json::{Map, Value};

use crate::constants::MAX_RECORDS_PER_OPERATION;
use crate::error::{GatewayError, Result};

pub type JsonObject = Map<String, Value>;

fn capitalize(field_name: &str) -> String {
    let mut chars = field_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Checks the size of a bulk request: at least one item and no more than
/// [`MAX_RECORDS_PER_OPERATION`].
pub fn validate_bulk<T>(items: &[T], field_name: &str, operation: &str) -> Result<()> {
    if items.is_empty() {
        return Err(GatewayError::validation(format!(
            "{} cannot be empty.",
            capitalize(field_name)
        )));
    }

    if items.len() > MAX_RECORDS_PER_OPERATION {
        return Err(GatewayError::LimitExceeded(format!(
            "You can {} a maximum of {} per operation",
            operation, MAX_RECORDS_PER_OPERATION
        )));
    }

    Ok(())
}

/// Turns a request body into a list of records, rejecting anything that is
/// not a bounded array of objects.
pub fn parse_bulk_payload(body: Value, operation: &str) -> Result<Vec<JsonObject>> {
    const FIELD: &str = "payload";

    let items = match body {
        Value::Array(items) => items,
        _ => {
            return Err(GatewayError::validation(format!(
                "Invalid value for {}. {} should be an array",
                FIELD,
                capitalize(FIELD)
            )))
        }
    };

    validate_bulk(&items, FIELD, operation)?;

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(GatewayError::validation(format!(
                "Invalid value for {}. Each item should be an object",
                FIELD
            ))),
        })
        .collect()
}

/// Every record of an update must carry a non-empty string identifier.
pub fn validate_update_identifiers(items: &[JsonObject], key_name: &str) -> Result<()> {
    let all_present = items.iter().all(|item| {
        matches!(item.get(key_name), Some(Value::String(id)) if !id.is_empty())
    });

    if !all_present {
        return Err(GatewayError::validation(format!(
            "{} cannot be empty.",
            key_name
        )));
    }

    Ok(())
}

/// Splits a comma-separated `ids` query value. Segments are kept as sent,
/// empty ones included; only an absent value yields an empty list.
pub fn parse_ids(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| value.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}
