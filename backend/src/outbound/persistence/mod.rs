//! Persistence adapters behind the repository and context ports.
//!
//! - **In-memory**: named process-local databases, shared by every context
//!   opened against the same name.
//! - **PostgreSQL**: Diesel queries over `diesel-async` connections checked
//!   out of a `bb8` pool, one connection per context.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) never leave
//! this module.
//!
//! # Example
//!
//! ```
//! use homeworks::domain::ports::ContextProvider;
//! use homeworks::outbound::persistence::{ContextFactory, ContextType};
//!
//! let factory = ContextFactory::in_memory("doc-example");
//! assert_eq!(factory.context_type(), ContextType::Memory);
//! let _context = factory.new_context();
//! ```

mod context_factory;
mod diesel_basic_error_mapping;
mod diesel_repository;
mod in_memory;
mod migrations;
mod models;
mod pool;
mod schema;
mod sql_context;

pub use context_factory::{
    ContextFactory, ContextType, DEFAULT_MEMORY_DATABASE, ParseContextTypeError,
};
pub use in_memory::{InMemoryContext, InMemoryDatabase};
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, OwnedConnection, PoolConfig, PoolError};
pub use sql_context::SqlContext;
