use std::net::SocketAddr;

use anyhow::Context;
use universe_generator::DEFAULT_UNIVERSE_SIZE;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub universe_size: usize,
    pub universe_seed: Option<u64>,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
    pub json_logs: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("DASHBOARD_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("DASHBOARD_BIND_ADDR must be host:port")?;

        let universe_size = match std::env::var("UNIVERSE_SIZE") {
            Ok(v) => v.parse().context("UNIVERSE_SIZE must be a positive integer")?,
            Err(_) => DEFAULT_UNIVERSE_SIZE,
        };

        let universe_seed = match std::env::var("UNIVERSE_SEED") {
            Ok(v) => Some(v.parse().context("UNIVERSE_SEED must be an unsigned integer")?),
            Err(_) => None,
        };

        let cors_allow_origin = std::env::var("CORS_ALLOW_ORIGIN")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let json_logs = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            universe_size,
            universe_seed,
            cors_allow_origin,
            json_logs,
        })
    }
}
