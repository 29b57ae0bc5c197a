//! Resident identity model.
//!
//! A [`User`] carries an optional self-declared room hint. The hint is
//! advisory only: room membership is recorded separately and is the source
//! of truth for which room a resident belongs to.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::room::{Block, RoomNumber};

/// Shortest password accepted at sign-up.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Validation errors for user primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The name is blank.
    #[error("name must not be empty")]
    EmptyName,
    /// The email address lacks a local part or domain.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// The password is shorter than [`PASSWORD_MIN_LENGTH`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its hyphenated string form.
    ///
    /// # Examples
    /// ```
    /// use facilities_backend::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new("not-a-uuid").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address normalised to trimmed lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use facilities_backend::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Ada@Example.ORG ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.org");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        match normalised.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(normalised))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque password digest produced by a credential hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded digest.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded digest string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Self-declared room hint recorded at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomHint {
    /// Declared block, if any.
    pub block: Option<Block>,
    /// Declared room number, if any.
    pub room_number: Option<RoomNumber>,
}

/// Field bundle used to construct a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub room_hint: RoomHint,
    pub created_at: DateTime<Utc>,
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    phone: Option<String>,
    room_hint: RoomHint,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a user, rejecting a blank name.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            name,
            email,
            phone,
            room_hint,
            created_at,
        } = draft;
        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            email,
            phone: phone.filter(|value| !value.trim().is_empty()),
            room_hint,
            created_at,
        })
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Normalised email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Optional contact phone number.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Advisory room hint.
    #[must_use]
    pub const fn room_hint(&self) -> &RoomHint {
        &self.room_hint
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user together with their stored password digest.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user: User,
    pub digest: PasswordDigest,
}

#[cfg(test)]
mod tests;
