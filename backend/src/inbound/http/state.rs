//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and build their logic objects
//! from a fresh persistence context on every request.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::ContextProvider;
use crate::domain::{ExerciseLogic, Scoped, SessionsLogic};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contexts: Arc<dyn ContextProvider>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    pub fn new(contexts: Arc<dyn ContextProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { contexts, clock }
    }

    /// Exercise logic over a new context, disposed when the guard drops.
    pub fn exercise_logic(&self) -> Scoped<ExerciseLogic> {
        let context = self.contexts.new_context();
        Scoped::new(ExerciseLogic::from_context(context.as_ref()))
    }

    /// Session logic over a new context, disposed when the guard drops.
    pub fn sessions_logic(&self) -> Scoped<SessionsLogic> {
        let context = self.contexts.new_context();
        Scoped::new(SessionsLogic::from_context(
            context.as_ref(),
            Arc::clone(&self.clock),
        ))
    }
}
