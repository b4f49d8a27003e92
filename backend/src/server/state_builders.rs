//! Builders for the persistence context provider and HTTP state.

use std::sync::Arc;

use actix_web::web;
use thiserror::Error;
use tracing::info;

use homeworks::domain::ports::ContextProvider;
use homeworks::inbound::http::state::HttpState;
use homeworks::outbound::persistence::{
    ContextFactory, ContextType, DbPool, MigrationError, ParseContextTypeError, PoolConfig,
    PoolError, run_migrations,
};

use super::ServerConfig;
use super::config::AppSettings;

/// Failures while preparing the backing store.
#[derive(Debug, Error)]
pub enum ContextSetupError {
    #[error(transparent)]
    ContextType(#[from] ParseContextTypeError),
    #[error("HOMEWORKS_DATABASE_URL must be set when the sql context is selected")]
    MissingDatabaseUrl,
    #[error("database migrations failed: {0}")]
    Migrations(#[from] MigrationError),
    #[error("database pool could not be built: {0}")]
    Pool(#[from] PoolError),
}

/// Build the context factory selected by `settings`.
///
/// SQL mode applies pending migrations before the pool is created.
pub async fn build_context_factory(
    settings: &AppSettings,
) -> Result<ContextFactory, ContextSetupError> {
    match settings.context_type()? {
        ContextType::Memory => {
            let name = settings.memory_database_name();
            info!(database = name, "using in-memory persistence");
            Ok(ContextFactory::in_memory(name))
        }
        ContextType::Sql => {
            let url = settings
                .database_url
                .as_deref()
                .ok_or(ContextSetupError::MissingDatabaseUrl)?;
            let applied = run_migrations(url).await?;
            info!(applied, "database migrations complete");
            let pool = DbPool::new(PoolConfig::new(url))?;
            Ok(ContextFactory::sql(pool))
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let contexts: Arc<dyn ContextProvider> = Arc::clone(&config.contexts);
    web::Data::new(HttpState::new(contexts, Arc::new(mockable::DefaultClock)))
}
