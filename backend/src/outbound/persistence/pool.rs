//! Shared PostgreSQL connection pool.
//!
//! SQL persistence contexts check out one owned connection each and keep it
//! until disposed, so the pool size bounds the number of requests touching
//! the database at once.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Connection owned by one persistence context.
pub type OwnedConnection = PooledConnection<'static, AsyncPgConnection>;

/// Errors raised while building or using the pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available within the checkout timeout.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be constructed.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and connection settings.
///
/// Defaults: 10 connections, no idle floor, 5 second checkout timeout. The
/// pool is built lazily so an unreachable server surfaces on first use
/// rather than at startup.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: None,
            connection_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Cloneable handle to the bb8 pool of async Diesel connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool without opening connections.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the builder rejects the settings.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        if config.max_size == 0 {
            return Err(PoolError::build("max_size must be at least 1"));
        }
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build_unchecked(manager);
        Ok(Self { inner })
    }

    /// Check out a connection detached from the pool's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when the server cannot be reached or
    /// the checkout times out.
    pub async fn get_owned(&self) -> Result<OwnedConnection, PoolError> {
        self.inner
            .get_owned()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults() {
        let config = PoolConfig::new("postgres://localhost/homeworks");
        assert_eq!(config.database_url(), "postgres://localhost/homeworks");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn config_builder_overrides() {
        let config = PoolConfig::new("postgres://localhost/homeworks")
            .with_max_size(3)
            .with_min_idle(Some(1))
            .with_connection_timeout(Duration::from_millis(250));
        assert_eq!(config.max_size, 3);
        assert_eq!(config.min_idle, Some(1));
        assert_eq!(config.connection_timeout, Duration::from_millis(250));
    }

    #[rstest]
    #[tokio::test]
    async fn zero_sized_pool_is_rejected() {
        let result = DbPool::new(PoolConfig::new("postgres://localhost/x").with_max_size(0));
        assert!(matches!(result, Err(PoolError::Build { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_server_fails_on_checkout() {
        let pool = DbPool::new(
            PoolConfig::new("postgres://nobody@127.0.0.1:1/missing")
                .with_connection_timeout(Duration::from_millis(200)),
        )
        .expect("lazy pool builds");
        let err = pool.get_owned().await.err().expect("nothing listens on port 1");
        assert!(matches!(err, PoolError::Checkout { .. }));
    }
}
