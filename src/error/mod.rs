//! Error handling module

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Required property missing: {0}")]
    RequiredPropertyMissing(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DeviceError {
    pub fn missing(property: &str) -> Self {
        DeviceError::RequiredPropertyMissing(property.to_string())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DeviceError::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for DeviceError {
    fn from(e: serde_json::Error) -> Self {
        DeviceError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;
