//! Driving port for resident sign-up and sign-in.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Request payload for [`AccountCommand::sign_up`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub room_number: Option<String>,
    pub block: Option<String>,
}

/// Request payload for [`AccountCommand::sign_in`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Use-case port for account flows. No session or token is issued.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a resident, optionally joining them to a room.
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, Error>;

    /// Verify credentials and return the matching user.
    async fn sign_in(&self, request: SignInRequest) -> Result<User, Error>;
}
