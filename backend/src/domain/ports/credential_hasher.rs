//! Driven port for password hashing and verification.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashing.
    pub enum CredentialHasherError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// One-way password digests with embedded salt.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Derive a salted digest for `password`.
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHasherError>;

    /// Check `password` against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest)
    -> Result<bool, CredentialHasherError>;
}
