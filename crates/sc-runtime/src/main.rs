//! # Sigchain Driver
//!
//! Reads one command per stdin line and writes one JSON envelope per line
//! to stdout. Logs go to stderr.
//!
//! ```text
//! $ echo 'create ECC till-1' | SC_LOG_LEVEL=warn sigchain
//! {"data":{"id":"4f1c..."}}
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use sc_runtime::{Dispatcher, ServiceConfig, ServiceContainer};

fn main() -> Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;

    // Initialize logging and metrics
    sc_telemetry::init_logging(&config.telemetry).context("Failed to initialize logging")?;
    sc_telemetry::register_metrics().context("Failed to register metrics")?;

    config
        .validate_for_production()
        .context("Refusing to start with insecure configuration")?;

    let container = ServiceContainer::new(config).context("Failed to build service container")?;
    let dispatcher = Dispatcher::new(&*container.service);

    info!("Sigchain ready; reading commands from stdin");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(reply) = dispatcher.handle_line(&line) else {
            break;
        };
        if !reply.is_success() {
            warn!(status = reply.status, "Command failed");
        }

        writeln!(stdout, "{}", reply.body).context("Failed to write reply")?;
        stdout.flush().context("Failed to flush stdout")?;
    }

    info!("Sigchain shutting down");
    Ok(())
}
