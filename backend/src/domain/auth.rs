//! Login credentials and session tokens.
//!
//! Inbound adapters parse raw payloads into these types before talking to the
//! session logic, so the domain never sees an unvalidated login attempt.

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroizing;

/// Returned when a login payload is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is not blank; it is kept verbatim.
/// - `password` is non-empty and kept verbatim.
///
/// Lookups compare both fields exactly, so surrounding whitespace is part of
/// the credential.
///
/// # Examples
/// ```
/// use homeworks::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "secret").unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Opaque bearer token identifying an issued session.
///
/// Tokens are random v4 UUIDs; the nil UUID is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Issue a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a stored token value.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}
