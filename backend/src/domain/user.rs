//! User data model.
//!
//! Users are owned by the persistence store and never leave the process:
//! there is no HTTP representation carrying the password.

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroizing;

use super::LoginCredentials;
use super::ports::Entity;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID, typically read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered user with plaintext credentials.
///
/// ## Invariants
/// - `username` is non-empty once trimmed.
/// - `password` is non-empty; whitespace is preserved.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    password: Zeroizing<String>,
}

impl User {
    /// Build a user, validating the username and password.
    pub fn try_new(
        id: UserId,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let password = password.into();
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            id,
            username,
            password: Zeroizing::new(password),
        })
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name, compared case-sensitively.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Lookup criteria for [`User`] repositories.
#[derive(Clone, PartialEq, Eq)]
pub enum UserFilter {
    /// Match on the identifier.
    ById(UserId),
    /// Match on username AND password, both exact.
    Credentials {
        username: String,
        password: Zeroizing<String>,
    },
}

impl UserFilter {
    /// Exact-match filter for a login attempt.
    pub fn credentials(credentials: &LoginCredentials) -> Self {
        Self::Credentials {
            username: credentials.username().to_owned(),
            password: Zeroizing::new(credentials.password().to_owned()),
        }
    }
}

impl fmt::Debug for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => f.debug_tuple("ById").field(id).finish(),
            Self::Credentials { username, .. } => f
                .debug_struct("Credentials")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

impl Entity for User {
    type Filter = UserFilter;
    type Key = UserId;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter {
            UserFilter::ById(id) => self.id == *id,
            UserFilter::Credentials { username, password } => {
                self.username == *username && self.password.as_str() == password.as_str()
            }
        }
    }
}
