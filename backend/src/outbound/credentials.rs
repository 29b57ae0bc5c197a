//! Argon2id password hashing.
//!
//! Digests are PHC strings with an embedded random salt, so verification
//! needs nothing beyond the stored value.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};

use crate::domain::PasswordDigest;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// [`CredentialHasher`] using Argon2id with the crate's default parameters.
#[derive(Clone, Default)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|err| CredentialHasherError::hash(err.to_string()))
    }

    fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHasherError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| CredentialHasherError::malformed_digest(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(other) => Err(CredentialHasherError::hash(other.to_string())),
        }
    }
}
