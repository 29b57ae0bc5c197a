//! Process settings loaded via OrthoConfig from `FACILITY_*` variables or
//! command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use facilities_backend::domain::DEFAULT_CREATE_DEADLINE;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings controlling the HTTP listener and the backing store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FACILITY")]
pub struct AppSettings {
    /// Listen address; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Listen port.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the in-process store is used.
    pub database_url: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub should_migrate: bool,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Deadline for one request-creation unit of work, in milliseconds.
    pub request_timeout_ms: Option<u64>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_ms
            .map_or(DEFAULT_CREATE_DEADLINE, Duration::from_millis)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
