//! Field access and initialization helpers for device records
//!
//! Every function takes the record as `impl Into<Option<&DeviceRecord>>`, so
//! callers pass `&device` directly or forward the `Option` they got back from
//! a lookup. An absent record is rejected with `InvalidArgument` before any
//! field is touched.

use chrono::{DateTime, Utc};

use crate::error::{DeviceError, Result};
use crate::models::{
    is_zero_timestamp, DeviceProperties, DeviceRecord, HubProperties, SystemProperties,
};

fn require<T>(device: Option<T>) -> Result<T> {
    device.ok_or_else(|| DeviceError::InvalidArgument("device".to_string()))
}

fn device_properties_mut(device: &mut DeviceRecord) -> Result<&mut DeviceProperties> {
    device
        .device_properties
        .as_mut()
        .ok_or_else(|| DeviceError::missing("DeviceProperties"))
}

// ============================================================================
// Property groups
// ============================================================================

pub fn get_device_properties<'a>(
    device: impl Into<Option<&'a DeviceRecord>>,
) -> Result<&'a DeviceProperties> {
    require(device.into())?
        .device_properties
        .as_ref()
        .ok_or_else(|| DeviceError::missing("DeviceProperties"))
}

pub fn get_hub_properties<'a>(
    device: impl Into<Option<&'a DeviceRecord>>,
) -> Result<&'a HubProperties> {
    require(device.into())?
        .hub_properties
        .as_ref()
        .ok_or_else(|| DeviceError::missing("IoTHub"))
}

// ============================================================================
// Identifiers
// ============================================================================

pub fn get_device_id<'a>(device: impl Into<Option<&'a DeviceRecord>>) -> Result<&'a str> {
    get_device_properties(device)?
        .device_id
        .as_deref()
        .ok_or_else(|| DeviceError::missing("DeviceID"))
}

/// Id the hub used for the connection that delivered this record
pub fn get_connection_device_id<'a>(
    device: impl Into<Option<&'a DeviceRecord>>,
) -> Result<&'a str> {
    get_hub_properties(device)?
        .connection_device_id
        .as_deref()
        .ok_or_else(|| DeviceError::missing("ConnectionDeviceId"))
}

/// Document-store resource id, empty if the record was never stored
pub fn get_storage_resource_id<'a>(
    device: impl Into<Option<&'a DeviceRecord>>,
) -> Result<String> {
    Ok(require(device.into())?
        .storage_resource_id
        .clone()
        .unwrap_or_default())
}

/// Document-store id, empty if the record was never stored
pub fn get_storage_id<'a>(device: impl Into<Option<&'a DeviceRecord>>) -> Result<String> {
    Ok(require(device.into())?
        .storage_id
        .clone()
        .unwrap_or_default())
}

// ============================================================================
// Timestamps and state
// ============================================================================

/// Creation time. Legacy zero values count as missing.
pub fn get_created_time<'a>(
    device: impl Into<Option<&'a DeviceRecord>>,
) -> Result<DateTime<Utc>> {
    match get_device_properties(device)?.created_time {
        Some(t) if !is_zero_timestamp(&t) => Ok(t),
        _ => Err(DeviceError::missing("CreatedTime")),
    }
}

/// Last update time; `None` for a device that was never updated
pub fn get_updated_time<'a>(
    device: impl Into<Option<&'a DeviceRecord>>,
) -> Result<Option<DateTime<Utc>>> {
    Ok(get_device_properties(device)?.updated_time)
}

pub fn touch_updated_time<'a>(device: impl Into<Option<&'a mut DeviceRecord>>) -> Result<()> {
    let props = device_properties_mut(require(device.into())?)?;
    props.updated_time = Some(Utc::now());
    Ok(())
}

pub fn get_hub_enabled_state<'a>(
    device: impl Into<Option<&'a DeviceRecord>>,
) -> Result<Option<bool>> {
    Ok(get_device_properties(device)?.hub_enabled_state)
}

// ============================================================================
// Construction
// ============================================================================

/// A new device with fresh properties and no commands
pub fn build_new_device(device_id: &str, is_simulated: bool, iccid: &str) -> DeviceRecord {
    let device = DeviceRecord {
        device_properties: Some(DeviceProperties::new(device_id)),
        system_properties: Some(SystemProperties::new(iccid)),
        commands: Vec::new(),
        command_history: Vec::new(),
        is_simulated,
        ..Default::default()
    };

    tracing::debug!(device_id, is_simulated, "Built new device record");
    device
}

/// Replace the device properties wholesale; nothing from the old value is kept.
pub fn initialize_device_properties<'a>(
    device: impl Into<Option<&'a mut DeviceRecord>>,
    device_id: &str,
    is_simulated: bool,
) -> Result<()> {
    let device = require(device.into())?;
    device.device_properties = Some(DeviceProperties::new(device_id));

    tracing::debug!(device_id, is_simulated, "Initialized device properties");
    Ok(())
}

pub fn initialize_system_properties<'a>(
    device: impl Into<Option<&'a mut DeviceRecord>>,
    iccid: &str,
) -> Result<()> {
    require(device.into())?.system_properties = Some(SystemProperties::new(iccid));
    Ok(())
}

/// Drop system properties before a simulated device reports its info.
///
/// Real devices never send system properties in device-info messages.
pub fn strip_system_properties_for_simulated_info_message<'a>(
    device: impl Into<Option<&'a mut DeviceRecord>>,
) -> Result<()> {
    require(device.into())?.system_properties = None;
    Ok(())
}
