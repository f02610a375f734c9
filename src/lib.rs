//! device-accessor - device record helpers
//!
//! Presence-checked reads and default initialization for the nested property
//! groups of a device record in an IoT device-management system.

pub mod accessor;
pub mod config;
pub mod error;
pub mod models;
pub mod provisioning;
pub mod storage;

pub use error::{DeviceError, Result};
pub use models::{DeviceProperties, DeviceRecord, HubProperties, SystemProperties};
