//! Data models for device records
//!
//! Records are persisted with PascalCase keys. Keys this crate does not model
//! are kept in `extra` at every level so they survive a load/save cycle.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mongodb::bson;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{DeviceError, Result};

/// Device state assigned to freshly initialized devices
pub const DEFAULT_DEVICE_STATE: &str = "normal";

// ============================================================================
// Device Record
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(
        rename = "DeviceProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_properties: Option<DeviceProperties>,
    #[serde(rename = "IoTHub", default, skip_serializing_if = "Option::is_none")]
    pub hub_properties: Option<HubProperties>,
    #[serde(
        rename = "SystemProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub system_properties: Option<SystemProperties>,
    /// Command definitions, opaque to this crate
    #[serde(rename = "Commands", default)]
    pub commands: Vec<Value>,
    #[serde(rename = "CommandHistory", default)]
    pub command_history: Vec<Value>,
    #[serde(rename = "IsSimulatedDevice", default)]
    pub is_simulated: bool,
    // Assigned by the document store
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<String>,
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub storage_resource_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceRecord {
    /// Decode a record loaded from the dynamic JSON layer.
    ///
    /// A JSON `null` means the caller had no record at all and is reported as
    /// an invalid argument rather than a decoding failure.
    pub fn from_json(value: Value) -> Result<Self> {
        if value.is_null() {
            return Err(DeviceError::InvalidArgument("device".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ============================================================================
// Property groups
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProperties {
    #[serde(rename = "DeviceID", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(rename = "HubEnabledState", default)]
    pub hub_enabled_state: Option<bool>,
    #[serde(
        rename = "CreatedTime",
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(
        rename = "UpdatedTime",
        default,
        deserialize_with = "deserialize_timestamp"
    )]
    pub updated_time: Option<DateTime<Utc>>,
    #[serde(rename = "DeviceState", default = "default_device_state")]
    pub device_state: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceProperties {
    /// Fresh properties for a device created now
    pub fn new(device_id: &str) -> Self {
        Self {
            device_id: Some(device_id.to_string()),
            hub_enabled_state: None,
            created_time: Some(Utc::now()),
            updated_time: None,
            device_state: default_device_state(),
            extra: Map::new(),
        }
    }
}

/// Hub connection metadata stamped on messages routed through the hub
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubProperties {
    #[serde(
        rename = "ConnectionDeviceId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_device_id: Option<String>,
    #[serde(
        rename = "ConnectionDeviceGenerationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_device_generation_id: Option<String>,
    #[serde(
        rename = "EnqueuedTime",
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub enqueued_time: Option<DateTime<Utc>>,
    #[serde(rename = "StreamId", default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(
        rename = "CorrelationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub correlation_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemProperties {
    #[serde(rename = "ICCID", default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SystemProperties {
    pub fn new(iccid: &str) -> Self {
        Self {
            iccid: Some(iccid.to_string()),
            extra: Map::new(),
        }
    }
}

fn default_device_state() -> String {
    DEFAULT_DEVICE_STATE.to_string()
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and offset-less `YYYY-MM-DDTHH:MM:SS[.fff]` values,
/// the latter read as UTC.
pub fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("Invalid timestamp {}: {}", s, e))
}

/// True for values that legacy records use to mean "never set":
/// the Unix epoch and 0001-01-01T00:00:00.
pub fn is_zero_timestamp(t: &DateTime<Utc>) -> bool {
    if t.timestamp() == 0 && t.timestamp_subsec_nanos() == 0 {
        return true;
    }
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc() == *t)
        .unwrap_or(false)
}

/// Timestamp as found in a stored record: text from the JSON layer, or a
/// native date read back from the document store (`{"$date": ...}`).
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimestamp {
    Text(String),
    Native(bson::DateTime),
}

impl StoredTimestamp {
    fn into_utc(self) -> std::result::Result<DateTime<Utc>, String> {
        match self {
            StoredTimestamp::Text(s) => parse_timestamp(&s),
            StoredTimestamp::Native(dt) => Utc
                .timestamp_millis_opt(dt.timestamp_millis())
                .single()
                .ok_or_else(|| format!("Timestamp out of range: {}", dt.timestamp_millis())),
        }
    }
}

fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<StoredTimestamp>::deserialize(deserializer)?;
    raw.map(|t| t.into_utc().map_err(serde::de::Error::custom))
        .transpose()
}
