//! Driven port for reading user identities.

use async_trait::async_trait;

use crate::domain::{EmailAddress, StoredCredentials, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user reads.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// A query failed or returned unusable data.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Identity store lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user and their password digest by normalised email.
    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;
}
