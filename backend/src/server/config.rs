//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use facilities_backend::domain::DEFAULT_CREATE_DEADLINE;
use facilities_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) request_timeout: Duration,
}

impl ServerConfig {
    /// Configuration serving from the in-process store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            request_timeout: DEFAULT_CREATE_DEADLINE,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Deadline for one request-creation unit of work.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
