//! Storage identifier extraction
//!
//! The document store stamps every record with an `id` and a `_rid` at the
//! top level. These helpers read them back from any serializable record
//! without the record type having to know about the store. Records that
//! model the keys as fields (like `DeviceRecord`) should read the fields.

use serde::Serialize;
use serde_json::Value;

/// Key holding the store-assigned document id
pub const STORAGE_ID_KEY: &str = "id";

/// Key holding the store-internal resource id
pub const STORAGE_RESOURCE_ID_KEY: &str = "_rid";

/// Store-assigned document id, or an empty string if the record has none
pub fn storage_id<T: Serialize + ?Sized>(record: &T) -> String {
    top_level_string(record, STORAGE_ID_KEY)
}

/// Store-internal resource id, or an empty string if the record has none
pub fn storage_resource_id<T: Serialize + ?Sized>(record: &T) -> String {
    top_level_string(record, STORAGE_RESOURCE_ID_KEY)
}

fn top_level_string<T: Serialize + ?Sized>(record: &T, key: &str) -> String {
    let value = match serde_json::to_value(record) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Record not serializable, no {}: {}", key, e);
            return String::new();
        }
    };

    match value.get(key) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            tracing::debug!("Ignoring non-string {} value: {}", key, other);
            String::new()
        }
    }
}
