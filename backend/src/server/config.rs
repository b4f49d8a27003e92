//! Application settings and the server configuration built from them.

use std::path::PathBuf;
use std::sync::Arc;

use homeworks::domain::ports::ContextProvider;
use homeworks::outbound::persistence::{
    ContextType, DEFAULT_MEMORY_DATABASE, ParseContextTypeError,
};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings loaded from CLI flags, `HOMEWORKS_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOMEWORKS")]
pub struct AppSettings {
    /// Backing store: `memory` or `sql` (default).
    pub context: Option<String>,
    /// PostgreSQL connection string; required in SQL mode.
    pub database_url: Option<String>,
    /// Name of the shared in-memory database.
    pub memory_database_name: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// JSON seed file applied at startup.
    pub seed_path: Option<PathBuf>,
}

impl AppSettings {
    /// Configured backing store, defaulting to SQL.
    pub fn context_type(&self) -> Result<ContextType, ParseContextTypeError> {
        self.context
            .as_deref()
            .map_or(Ok(ContextType::default()), str::parse)
    }

    pub fn memory_database_name(&self) -> &str {
        self.memory_database_name
            .as_deref()
            .unwrap_or(DEFAULT_MEMORY_DATABASE)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }
}

/// Everything `create_server` needs.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) contexts: Arc<dyn ContextProvider>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: (String, u16), contexts: Arc<dyn ContextProvider>) -> Self {
        Self {
            bind_addr,
            contexts,
        }
    }
}
