//! `profile-tool`: binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Decode the profile key, then load and validate the field tables.
//! 4. Handle JSON request lines from stdin until EOF.

mod config;
mod driver;
mod handlers;
mod state;
mod telemetry;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Logging is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(version = env!("CARGO_PKG_VERSION"), "profile-tool starting");

    // -----------------------------------------------------------------------
    // 3. Key and field tables
    // -----------------------------------------------------------------------
    let key = cfg.profile_key()?;
    let specs = cfg.field_specs()?;
    info!(
        custom_tables = cfg.field_specs_path.is_some(),
        "field tables loaded and validated"
    );

    // -----------------------------------------------------------------------
    // 4. Request loop
    // -----------------------------------------------------------------------
    let state = AppState::new(key, specs);
    let handled = driver::run(&state, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    info!(handled, "input closed");

    Ok(())
}
