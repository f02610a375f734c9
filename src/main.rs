//! device-info - print device-info messages for new devices
//!
//! Builds the configured number of device records and writes each info
//! message to stdout as one JSON line. Logs go to stderr.

use std::io::Write;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use device_accessor::config::Config;
use device_accessor::provisioning;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "device_accessor=info,device_info=info".into()),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        "Configuration loaded: {} device(s), simulated={}",
        config.device.count,
        config.device.is_simulated
    );

    let messages = provisioning::device_info_messages(&config.device)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for message in &messages {
        serde_json::to_writer(&mut out, message)?;
        writeln!(out)?;
    }
    out.flush()?;

    tracing::info!("Wrote {} device info message(s)", messages.len());
    Ok(())
}
