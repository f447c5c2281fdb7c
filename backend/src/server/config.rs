//! HTTP server configuration object.

use backend::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) dev_staff_token: Option<String>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            dev_staff_token: None,
        }
    }

    /// Attach a database pool; repositories and credentials then use Diesel.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed the in-memory credential store with a staff token.
    ///
    /// Ignored when a database pool is attached.
    #[must_use]
    pub fn with_dev_staff_token(mut self, token: Option<String>) -> Self {
        self.dev_staff_token = token;
        self
    }
}
