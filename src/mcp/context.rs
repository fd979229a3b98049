//! Per-process state shared by every tool call

use std::sync::Arc;

use crate::config::BoostConfig;
use crate::connection::OdooConnection;

/// Authenticated connection plus the project configuration
///
/// Built once at start-up and shared by reference with the handlers.
#[derive(Clone)]
pub struct ServerContext {
    connection: Arc<dyn OdooConnection>,
    config: BoostConfig,
}

impl ServerContext {
    pub fn new(connection: Arc<dyn OdooConnection>, config: BoostConfig) -> Self {
        Self { connection, config }
    }

    pub fn connection(&self) -> &dyn OdooConnection {
        self.connection.as_ref()
    }

    pub fn config(&self) -> &BoostConfig {
        &self.config
    }
}

impl std::fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerContext")
            .field("url", &self.config.connection.url)
            .field("database", &self.config.connection.database)
            .finish_non_exhaustive()
    }
}
