//! Configuration module

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Settings for the devices the `device-info` tool builds
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Ids become `{prefix}{n}`; without a prefix each id gets a random suffix
    #[serde(default)]
    pub device_id_prefix: Option<String>,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub iccid: Option<String>,
    #[serde(default = "default_true")]
    pub is_simulated: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_id_prefix: None,
            count: default_count(),
            iccid: None,
            is_simulated: true,
        }
    }
}

fn default_count() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// `DEVICEINFO__DEVICE__COUNT=3` sets `device.count`
fn environment() -> config::Environment {
    config::Environment::with_prefix("DEVICEINFO").separator("__")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with_env(environment())
    }

    fn load_with_env(env: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(env)
            .build()?;

        Ok(Self::from_settings(settings))
    }

    /// Deserialize layered settings, falling back to defaults when they don't fit
    fn from_settings(settings: config::Config) -> Self {
        settings.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!("Invalid configuration, using defaults: {}", e);
            Config::default()
        })
    }
}
