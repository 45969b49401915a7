//! Server configuration from environment variables.

use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;

/// Where the dashboard listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `SCADENZARIO_HOST` and `SCADENZARIO_PORT`, either from the
    /// environment or from a `.env` file. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("SCADENZARIO_HOST") {
            config.host = host
                .trim()
                .parse()
                .with_context(|| format!("SCADENZARIO_HOST is not an IP address: {host}"))?;
        }

        if let Some(port) = lookup("SCADENZARIO_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("SCADENZARIO_PORT is not a port number: {port}"))?;
        }

        Ok(config)
    }

    /// Apply command line values, which take precedence over the environment
    pub fn with_overrides(mut self, host: Option<IpAddr>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
