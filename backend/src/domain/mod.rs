//! Domain primitives, ports and use-cases.
//!
//! Public surface:
//! - [`Exercise`], [`User`], [`Session`]: persisted entities with typed
//!   lookup filters.
//! - [`ExerciseLogic`], [`SessionsLogic`]: per-request use-cases over the
//!   repository port.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`Dispose`] / [`Scoped`]: release of per-request persistence contexts.

mod auth;
mod dispose;
pub mod error;
mod exercise;
mod exercise_logic;
pub mod ports;
mod repository_error_mapping;
pub mod seeding;
mod session;
mod sessions_logic;
#[cfg(test)]
pub(crate) mod test_doubles;
mod trace_id;
mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, SessionToken};
pub use self::dispose::{Dispose, Scoped};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exercise::{Exercise, ExerciseFilter, ExerciseId};
pub use self::exercise_logic::ExerciseLogic;
pub use self::session::{Session, SessionFilter};
pub use self::sessions_logic::{INVALID_CREDENTIALS_MESSAGE, SessionsLogic};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserFilter, UserId, UserValidationError};
