use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5000";

/// Runtime settings, read from `CLUSTERLENS_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server_addr: SocketAddr,
    /// Overrides the embedded price table.
    pub pricing_file: Option<String>,
    /// Daily rolling log files are written here when set.
    pub log_dir: Option<String>,
    /// Run every view once, log it and exit.
    pub debug_mode: bool,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_addr = non_empty("CLUSTERLENS_SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr: SocketAddr = raw_addr
            .parse()
            .with_context(|| format!("invalid CLUSTERLENS_SERVER_ADDR: {}", raw_addr))?;

        let debug_mode = non_empty("CLUSTERLENS_DEBUG_MODE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            server_addr,
            pricing_file: non_empty("CLUSTERLENS_PRICING_FILE"),
            log_dir: non_empty("CLUSTERLENS_LOG_DIR"),
            debug_mode,
        })
    }
}
