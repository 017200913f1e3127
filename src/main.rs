//! Eventquest - Entry Point
//!
//! Loads configuration and reference data, then serves the mock API until
//! Ctrl+C.

use anyhow::Result;

use eventquest::data::DataManager;
use eventquest::server::{self, AppState};
use eventquest::Config;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Eventquest v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    log::info!("Configuration: {:?}", config);

    if std::env::args().any(|arg| arg == "--export-data") {
        eventquest::data::export_default_data(&config.data_dir)?;
        return Ok(());
    }

    let data = DataManager::load_from_dir(&config.data_dir);
    let addr = config.bind_addr;
    let state = AppState::new(config, data);

    tokio::select! {
        result = server::serve(state, addr) => {
            if let Err(e) = result {
                log::error!("HTTP server failed: {}", e);
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
