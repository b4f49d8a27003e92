//! Process-local persistence backed by named in-memory databases.
//!
//! Databases live in a global registry keyed by name: every context opened
//! against the same name sees the same rows until the process exits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{Entity, PersistenceContext, Repository, RepositoryError};
use crate::domain::{Dispose, Exercise, Session, User};

/// One named set of tables.
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<Vec<User>>,
    exercises: RwLock<Vec<Exercise>>,
    sessions: RwLock<Vec<Session>>,
}

fn registry() -> &'static Mutex<HashMap<String, Arc<InMemoryDatabase>>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<InMemoryDatabase>>>> = OnceLock::new();
    REGISTRY.get_or_init(Mutex::default)
}

impl InMemoryDatabase {
    /// The database registered under `name`, created empty on first use.
    pub fn named(name: &str) -> Arc<Self> {
        let mut databases = registry().lock().unwrap_or_else(PoisonError::into_inner);
        databases
            .entry(name.to_owned())
            .or_insert_with(|| {
                debug!(database = name, "in-memory database created");
                Arc::default()
            })
            .clone()
    }
}

/// Entities with a table in [`InMemoryDatabase`].
trait InMemoryTable: Entity {
    fn table(database: &InMemoryDatabase) -> &RwLock<Vec<Self>>;
}

impl InMemoryTable for User {
    fn table(database: &InMemoryDatabase) -> &RwLock<Vec<Self>> {
        &database.users
    }
}

impl InMemoryTable for Exercise {
    fn table(database: &InMemoryDatabase) -> &RwLock<Vec<Self>> {
        &database.exercises
    }
}

impl InMemoryTable for Session {
    fn table(database: &InMemoryDatabase) -> &RwLock<Vec<Self>> {
        &database.sessions
    }
}

struct ContextState {
    database: Arc<InMemoryDatabase>,
    disposed: AtomicBool,
}

impl ContextState {
    fn database(&self) -> Result<&InMemoryDatabase, RepositoryError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(RepositoryError::disposed());
        }
        Ok(&self.database)
    }
}

/// Unit of work over one named in-memory database.
pub struct InMemoryContext {
    state: Arc<ContextState>,
}

impl InMemoryContext {
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self {
            state: Arc::new(ContextState {
                database,
                disposed: AtomicBool::new(false),
            }),
        }
    }

    fn repository<T: InMemoryTable>(&self) -> Box<dyn Repository<T>> {
        Box::new(InMemoryRepository::<T> {
            state: Arc::clone(&self.state),
            _entity: std::marker::PhantomData,
        })
    }
}

impl Dispose for InMemoryContext {
    fn dispose(&self) {
        self.state.disposed.store(true, Ordering::Release);
    }
}

impl PersistenceContext for InMemoryContext {
    fn exercises(&self) -> Box<dyn Repository<Exercise>> {
        self.repository()
    }

    fn users(&self) -> Box<dyn Repository<User>> {
        self.repository()
    }

    fn sessions(&self) -> Box<dyn Repository<Session>> {
        self.repository()
    }
}

struct InMemoryRepository<T> {
    state: Arc<ContextState>,
    _entity: std::marker::PhantomData<fn() -> T>,
}

fn poisoned<E>(_: PoisonError<E>) -> RepositoryError {
    RepositoryError::query("in-memory table lock poisoned")
}

impl<T> Dispose for InMemoryRepository<T> {
    fn dispose(&self) {
        self.state.disposed.store(true, Ordering::Release);
    }
}

#[async_trait]
impl<T: InMemoryTable> Repository<T> for InMemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        let database = self.state.database()?;
        let rows = T::table(database).read().map_err(poisoned)?;
        Ok(rows.clone())
    }

    async fn get_first(&self, filter: &T::Filter) -> Result<Option<T>, RepositoryError> {
        let database = self.state.database()?;
        let rows = T::table(database).read().map_err(poisoned)?;
        Ok(rows.iter().find(|row| row.matches(filter)).cloned())
    }

    async fn add(&self, entity: T) -> Result<(), RepositoryError> {
        let database = self.state.database()?;
        let mut rows = T::table(database).write().map_err(poisoned)?;
        let key = entity.key();
        if rows.iter().any(|row| row.key() == key) {
            debug!(?key, "in-memory insert rejected: duplicate key");
            return Err(RepositoryError::query("duplicate key"));
        }
        rows.push(entity);
        Ok(())
    }
}
