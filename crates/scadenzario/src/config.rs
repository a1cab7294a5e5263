//! Runtime configuration: command-line values, overridden by environment.

use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HORIZON_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Days ahead counted as "coming up soon"
    pub horizon_days: i64,
    pub seed: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            horizon_days: DEFAULT_HORIZON_DAYS,
            seed: None,
        }
    }
}

impl Config {
    /// Load `.env` (if any) and apply `SCADENZARIO_*` variables on top of `self`.
    ///
    /// Recognized: `SCADENZARIO_HOST`, `SCADENZARIO_PORT`,
    /// `SCADENZARIO_HORIZON_DAYS`, `SCADENZARIO_SEED`.
    pub fn with_env(self) -> Result<Self> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        self.with_vars(|key| std::env::var(key).ok())
    }

    fn with_vars<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("SCADENZARIO_HOST") {
            self.host = host
                .parse()
                .with_context(|| format!("SCADENZARIO_HOST is not an IP address: {host}"))?;
        }
        if let Some(port) = var("SCADENZARIO_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("SCADENZARIO_PORT is not a port number: {port}"))?;
        }
        if let Some(days) = var("SCADENZARIO_HORIZON_DAYS") {
            self.horizon_days = days
                .parse()
                .with_context(|| format!("SCADENZARIO_HORIZON_DAYS is not a number: {days}"))?;
        }
        if let Some(seed) = var("SCADENZARIO_SEED") {
            self.seed = Some(PathBuf::from(seed));
        }
        Ok(self)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
