//! Runtime configuration loaded from environment variables
//!
//! Every setting has a default so the server starts with zero configuration
//! for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

pub const BIND_VAR: &str = "EVENTQUEST_BIND";
pub const DATA_DIR_VAR: &str = "EVENTQUEST_DATA_DIR";
pub const SEED_VAR: &str = "EVENTQUEST_SEED";
pub const LATENCY_VAR: &str = "EVENTQUEST_LATENCY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP API listens on.
    /// Env: `EVENTQUEST_BIND`, default `127.0.0.1:3000`
    pub bind_addr: SocketAddr,

    /// Directory holding `events.ron`, `challenges.ron` and `loot_pools.ron`.
    /// Env: `EVENTQUEST_DATA_DIR`, default the platform data dir
    pub data_dir: PathBuf,

    /// Fixed RNG seed for reproducible runs; entropy when unset.
    /// Env: `EVENTQUEST_SEED`
    pub seed: Option<u64>,

    /// Delay added before each API response.
    /// Env: `EVENTQUEST_LATENCY_MS`, default 0
    pub latency: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: ([127, 0, 0, 1], 3000).into(),
            data_dir: default_data_dir(),
            seed: None,
            latency: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_VAR) {
            match addr.parse::<SocketAddr>() {
                Ok(parsed) => config.bind_addr = parsed,
                Err(_) => log::warn!("Invalid {} '{}', using {}", BIND_VAR, addr, config.bind_addr),
            }
        }

        if let Some(dir) = lookup(DATA_DIR_VAR) {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        if let Some(seed) = lookup(SEED_VAR) {
            match seed.parse::<u64>() {
                Ok(parsed) => config.seed = Some(parsed),
                Err(_) => log::warn!("Invalid {} '{}', seeding from entropy", SEED_VAR, seed),
            }
        }

        if let Some(ms) = lookup(LATENCY_VAR) {
            match ms.parse::<u64>() {
                Ok(parsed) => config.latency = Duration::from_millis(parsed),
                Err(_) => log::warn!("Invalid {} '{}', no added latency", LATENCY_VAR, ms),
            }
        }

        config
    }
}

/// Platform data directory, or `./data` when none can be determined
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "eventquest", "eventquest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
