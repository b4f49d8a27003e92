//! Unit-of-work port handing out repositories over one persistence context.

use std::sync::Arc;

use crate::domain::{Dispose, Exercise, Session, User};

use super::Repository;

/// One unit of work against the backing store.
///
/// Contexts are created per request and must not be shared between
/// concurrent requests. Repositories handed out by a context share it, so
/// disposing any of them disposes the context.
pub trait PersistenceContext: Dispose + Send + Sync {
    /// Repository over stored exercises.
    fn exercises(&self) -> Box<dyn Repository<Exercise>>;

    /// Repository over registered users.
    fn users(&self) -> Box<dyn Repository<User>>;

    /// Repository over issued sessions.
    fn sessions(&self) -> Box<dyn Repository<Session>>;
}

/// Factory producing fresh persistence contexts.
#[cfg_attr(test, mockall::automock)]
pub trait ContextProvider: Send + Sync {
    /// Open a new context. Connections are acquired lazily on first use.
    fn new_context(&self) -> Arc<dyn PersistenceContext>;
}
