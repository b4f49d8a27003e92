//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod persistence_context;
mod repository;

#[cfg(test)]
pub use persistence_context::MockContextProvider;
pub use persistence_context::{ContextProvider, PersistenceContext};
pub use repository::{Entity, Repository, RepositoryError};
