//! Application settings loaded via OrthoConfig.
//!
//! Values layer as defaults, configuration file, `SHAYARI_*` environment
//! variables, then command-line flags.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Errors raised while turning settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Settings could not be read from any source.
    #[error("failed to load settings: {message}")]
    Load { message: String },
    /// The configured host is not an IP address.
    #[error("invalid listen host '{host}'; expected an IP address")]
    InvalidHost { host: String },
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHAYARI")]
pub struct AppSettings {
    /// Listen address. Defaults to all interfaces.
    pub host: Option<String>,
    /// Listen port. Defaults to 3000.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Without it, debug builds use in-memory
    /// stores and release builds refuse to start.
    pub database_url: Option<String>,
}

impl AppSettings {
    /// Load settings from the process arguments and environment.
    pub fn load_from_process() -> Result<Self, SettingsError> {
        Self::load().map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Configured host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        host.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port()))
            .map_err(|_| SettingsError::InvalidHost {
                host: host.to_owned(),
            })
    }
}
