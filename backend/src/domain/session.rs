//! Issued login sessions.

use chrono::{DateTime, Utc};

use super::ports::Entity;
use super::{SessionToken, User};

/// A token paired with the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
    user: User,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Pair a token with its user.
    pub fn new(token: SessionToken, user: User, created_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user,
            created_at,
        }
    }

    /// Bearer token identifying the session.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Authenticated user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Instant the token was issued.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Release the session, keeping only its user.
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Lookup criteria for [`Session`] repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFilter {
    ByToken(SessionToken),
}

impl Entity for Session {
    type Filter = SessionFilter;
    type Key = SessionToken;

    fn key(&self) -> Self::Key {
        self.token
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter {
            SessionFilter::ByToken(token) => self.token == *token,
        }
    }
}
