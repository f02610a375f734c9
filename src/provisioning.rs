//! Device-info messages for newly provisioned devices
//!
//! Simulated devices are built by the same code as real ones, so their system
//! properties are stripped before the message goes out.

use uuid::Uuid;

use crate::accessor;
use crate::config::DeviceConfig;
use crate::error::Result;
use crate::models::DeviceRecord;

const GENERATED_ID_PREFIX: &str = "SampleDevice";

/// Id for the `n`th device (1-based)
pub fn device_id(config: &DeviceConfig, n: u32) -> String {
    match &config.device_id_prefix {
        Some(prefix) => format!("{}{}", prefix, n),
        None => format!("{}-{}", GENERATED_ID_PREFIX, Uuid::new_v4()),
    }
}

/// Build a new device and shape it as the info message it would report
pub fn device_info_message(config: &DeviceConfig, device_id: &str) -> Result<DeviceRecord> {
    let iccid = config.iccid.as_deref().unwrap_or_default();
    let mut device = accessor::build_new_device(device_id, config.is_simulated, iccid);

    if device.is_simulated {
        accessor::strip_system_properties_for_simulated_info_message(&mut device)?;
    }

    let id = accessor::get_device_id(&device)?;
    tracing::info!(
        device_id = id,
        simulated = device.is_simulated,
        "Device info prepared"
    );
    Ok(device)
}

/// All info messages the configuration asks for
pub fn device_info_messages(config: &DeviceConfig) -> Result<Vec<DeviceRecord>> {
    (1..=config.count)
        .map(|n| device_info_message(config, &device_id(config, n)))
        .collect()
}
