//! Login and session resolution.
//!
//! A successful login stores the issued session through the session
//! repository, so the returned token can be resolved back to its user on
//! later requests.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use super::ports::{PersistenceContext, Repository};
use super::repository_error_mapping::map_repository_error;
use super::{
    Dispose, Error, LoginCredentials, Session, SessionFilter, SessionToken, User, UserFilter,
};

/// Message returned when no user matches the supplied credentials.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Username/Password not valid";

/// Session use-cases over the session and user repositories.
pub struct SessionsLogic {
    sessions: Box<dyn Repository<Session>>,
    users: Box<dyn Repository<User>>,
    clock: Arc<dyn Clock>,
}

impl SessionsLogic {
    /// Wire the logic to its repositories and clock.
    pub fn new(
        sessions: Box<dyn Repository<Session>>,
        users: Box<dyn Repository<User>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            users,
            clock,
        }
    }

    /// Build the logic over a fresh context's repositories.
    pub fn from_context(context: &dyn PersistenceContext, clock: Arc<dyn Clock>) -> Self {
        Self::new(context.sessions(), context.users(), clock)
    }

    /// Authenticate `credentials` and issue a persisted session token.
    ///
    /// Fails with [`ErrorCode::InvalidCredentials`](super::ErrorCode) when no
    /// user has exactly this username and password.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error> {
        let user = self
            .users
            .get_first(&UserFilter::credentials(credentials))
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                debug!(username = credentials.username(), "login rejected");
                Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE)
            })?;

        let token = SessionToken::generate();
        let user_id = *user.id();
        let session = Session::new(token, user, self.clock.utc());
        self.sessions
            .add(session)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user_id, "session issued");
        Ok(token)
    }

    /// The user a previously issued `token` belongs to.
    pub async fn user_for(&self, token: &SessionToken) -> Result<User, Error> {
        self.sessions
            .get_first(&SessionFilter::ByToken(*token))
            .await
            .map_err(map_repository_error)?
            .map(Session::into_user)
            .ok_or_else(|| Error::unauthorized("session not found"))
    }
}

impl Dispose for SessionsLogic {
    fn dispose(&self) {
        self.sessions.dispose();
        self.users.dispose();
    }
}
