//! Identities that own interest vectors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identifier for a user, as supplied by the surrounding application.
///
/// Ordering is lexical and is used to give candidate sets a deterministic
/// order before ranking.
///
/// # Examples
/// ```
/// use kindred_core::UserId;
///
/// let id: UserId = "64f1c0ffee".parse()?;
/// assert_eq!(id.as_str(), "64f1c0ffee");
/// assert!("   ".parse::<UserId>().is_err());
/// # Ok::<(), kindred_core::UserIdError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    /// The identifier was empty or whitespace.
    #[error("user id must not be blank")]
    Blank,
}

impl UserId {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    /// Returns [`UserIdError::Blank`] for empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let raw = id.into();
        if raw.trim().is_empty() {
            return Err(UserIdError::Blank);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
