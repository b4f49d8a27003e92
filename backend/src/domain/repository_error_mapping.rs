//! Translation of repository failures into transport-agnostic errors.

use tracing::warn;

use super::Error;
use super::ports::RepositoryError;

pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    warn!(%error, "repository call failed");
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("store unavailable: {message}"))
        }
        RepositoryError::Query { message } => Error::internal(message),
        RepositoryError::Disposed => Error::internal("persistence context already disposed"),
    }
}
