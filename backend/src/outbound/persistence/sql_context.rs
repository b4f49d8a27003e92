//! PostgreSQL persistence context.
//!
//! A context checks out one pooled connection on its first query and keeps
//! it parked until disposed. Each query takes the parked connection, runs on
//! it as an owned value and parks it again, so no lock is held across an
//! await. Repositories handed out by the context share the parked connection
//! and its disposal flag.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::ports::{PersistenceContext, Repository, RepositoryError};
use crate::domain::{Dispose, Exercise, Session, User};

use super::diesel_basic_error_mapping::map_pool_error;
use super::pool::{DbPool, OwnedConnection};

pub(super) struct SqlState {
    pool: DbPool,
    parked: Mutex<Option<OwnedConnection>>,
    disposed: AtomicBool,
}

impl SqlState {
    fn slot(&self) -> MutexGuard<'_, Option<OwnedConnection>> {
        self.parked.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the context's connection, checking one out on first use.
    ///
    /// Concurrent queries on one context each hold their own connection;
    /// only one of them is parked afterwards.
    pub(super) async fn checkout(&self) -> Result<OwnedConnection, RepositoryError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(RepositoryError::disposed());
        }
        let parked = self.slot().take();
        if let Some(connection) = parked {
            return Ok(connection);
        }
        let connection = self.pool.get_owned().await.map_err(map_pool_error)?;
        debug!("sql context acquired connection");
        Ok(connection)
    }

    /// Return a connection taken by [`SqlState::checkout`].
    ///
    /// After disposal, or when another connection is already parked, the
    /// connection goes straight back to the pool.
    pub(super) fn park(&self, connection: OwnedConnection) {
        let mut slot = self.slot();
        if self.disposed.load(Ordering::Acquire) || slot.is_some() {
            return;
        }
        *slot = Some(connection);
    }

    fn release(&self) {
        let mut slot = self.slot();
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if slot.take().is_some() {
            debug!("sql context released connection");
        }
    }
}

/// Unit of work over the shared PostgreSQL pool.
pub struct SqlContext {
    state: Arc<SqlState>,
}

impl SqlContext {
    pub fn new(pool: DbPool) -> Self {
        Self {
            state: Arc::new(SqlState {
                pool,
                parked: Mutex::new(None),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    fn repository<T>(&self) -> SqlRepository<T> {
        SqlRepository {
            state: Arc::clone(&self.state),
            _entity: PhantomData,
        }
    }
}

impl Dispose for SqlContext {
    fn dispose(&self) {
        self.state.release();
    }
}

impl PersistenceContext for SqlContext {
    fn exercises(&self) -> Box<dyn Repository<Exercise>> {
        Box::new(self.repository::<Exercise>())
    }

    fn users(&self) -> Box<dyn Repository<User>> {
        Box::new(self.repository::<User>())
    }

    fn sessions(&self) -> Box<dyn Repository<Session>> {
        Box::new(self.repository::<Session>())
    }
}

/// Diesel repository over one table; queries live in `diesel_repository`.
pub(super) struct SqlRepository<T> {
    state: Arc<SqlState>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> SqlRepository<T> {
    pub(super) async fn checkout(&self) -> Result<OwnedConnection, RepositoryError> {
        self.state.checkout().await
    }

    pub(super) fn park(&self, connection: OwnedConnection) {
        self.state.park(connection);
    }
}

impl<T> Dispose for SqlRepository<T> {
    fn dispose(&self) {
        self.state.release();
    }
}
