//! Generic repository port shared by every persisted entity.
//!
//! Each entity names its own filter type so that relational adapters can
//! translate lookups into `WHERE` clauses while the in-memory adapter simply
//! evaluates [`Entity::matches`].

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Dispose;

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// The owning persistence context was already disposed.
        Disposed => "repository used after its context was disposed",
    }
}

/// A persisted entity and the lookups its repositories support.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Lookup criteria accepted by [`Repository::get_first`].
    type Filter: Debug + Send + Sync;

    /// Primary key; at most one stored entity carries each key.
    type Key: Debug + PartialEq;

    fn key(&self) -> Self::Key;

    /// Whether this entity satisfies `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// Data access over one entity type.
///
/// Dropping a repository does not release its context; call
/// [`Dispose::dispose`] (or hold the owning logic in a
/// [`Scoped`](crate::domain::Scoped) guard).
#[async_trait]
pub trait Repository<T: Entity>: Dispose + Send + Sync {
    /// Every stored entity. Each call re-queries the store.
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// First entity matching `filter`, if any.
    async fn get_first(&self, filter: &T::Filter) -> Result<Option<T>, RepositoryError>;

    /// Store a new entity.
    ///
    /// Fails with [`RepositoryError::Query`] when an entity with the same
    /// [`Entity::key`] is already stored.
    async fn add(&self, entity: T) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<T, R> Repository<T> for Arc<R>
where
    T: Entity,
    R: Repository<T> + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        (**self).get_all().await
    }

    async fn get_first(&self, filter: &T::Filter) -> Result<Option<T>, RepositoryError> {
        (**self).get_first(filter).await
    }

    async fn add(&self, entity: T) -> Result<(), RepositoryError> {
        (**self).add(entity).await
    }
}
