use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, EnvFilter};

use crate::{errors::Error, Result};

/// Initialize logging/tracing for the bot.
///
/// Events go to stderr, or are appended to `log_file` when one is configured.
pub fn init(service_name: &str, log_file: Option<&Path>) -> Result<()> {
    // Default: info for our crates. Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,hwb_core=info,hwb_telegram=info,{service_name}=info"
        ))
    });

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|e| Error::Config(format!("logging init failed: {e}")))
}
