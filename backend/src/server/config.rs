//! HTTP server configuration object.

use std::net::SocketAddr;

use usuarios::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origin: String,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, allowed_origin: impl Into<String>) -> Self {
        Self {
            bind_addr,
            allowed_origin: allowed_origin.into(),
            db_pool: None,
        }
    }

    /// Persist records in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
