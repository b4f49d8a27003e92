//! Factory choosing the backing store for each persistence context.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::ports::{ContextProvider, PersistenceContext};

use super::in_memory::{InMemoryContext, InMemoryDatabase};
use super::pool::DbPool;
use super::sql_context::SqlContext;

/// Name of the in-memory database used when none is configured.
pub const DEFAULT_MEMORY_DATABASE: &str = "HomeworksDB";

/// Backing store selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    /// Named process-local database.
    Memory,
    /// PostgreSQL through the shared pool.
    #[default]
    Sql,
}

/// Returned when a context type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown context type `{0}`; expected `memory` or `sql`")]
pub struct ParseContextTypeError(String);

impl FromStr for ContextType {
    type Err = ParseContextTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" => Ok(Self::Memory),
            "sql" | "postgres" => Ok(Self::Sql),
            other => Err(ParseContextTypeError(other.to_owned())),
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Sql => "sql",
        })
    }
}

#[derive(Clone)]
enum Backend {
    Memory(Arc<InMemoryDatabase>),
    Sql(DbPool),
}

/// Produces one fresh context per unit of work.
#[derive(Clone)]
pub struct ContextFactory {
    backend: Backend,
}

impl ContextFactory {
    /// Contexts over the in-memory database registered as `name`.
    pub fn in_memory(name: &str) -> Self {
        Self {
            backend: Backend::Memory(InMemoryDatabase::named(name)),
        }
    }

    /// Contexts checking connections out of `pool`.
    pub fn sql(pool: DbPool) -> Self {
        Self {
            backend: Backend::Sql(pool),
        }
    }

    pub fn context_type(&self) -> ContextType {
        match self.backend {
            Backend::Memory(_) => ContextType::Memory,
            Backend::Sql(_) => ContextType::Sql,
        }
    }
}

impl fmt::Debug for ContextFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextFactory")
            .field("context_type", &self.context_type())
            .finish_non_exhaustive()
    }
}

impl ContextProvider for ContextFactory {
    fn new_context(&self) -> Arc<dyn PersistenceContext> {
        match &self.backend {
            Backend::Memory(database) => Arc::new(InMemoryContext::new(Arc::clone(database))),
            Backend::Sql(pool) => Arc::new(SqlContext::new(pool.clone())),
        }
    }
}
