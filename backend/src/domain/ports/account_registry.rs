//! Driven port for atomically creating a user and their room membership.

use async_trait::async_trait;

use crate::domain::{Block, RoomNumber, User};

use super::define_port_error;
use super::facility_transaction::UserInsert;

define_port_error! {
    /// Failures raised while registering an account.
    pub enum AccountRegistryError {
        /// The email address belongs to another user.
        EmailTaken { email: String } => "email {email} is already registered",
        /// A concurrent writer created the room but it is not yet visible.
        RoomConflict { block: String, room_number: String } => "room {room_number} in block {block} is being created concurrently",
        /// The store could not be reached.
        Connection { message: String } => "account registry connection failed: {message}",
        /// A statement failed.
        Query { message: String } => "account registry query failed: {message}",
    }
}

/// Input to one registration unit of work.
#[derive(Debug, Clone)]
pub struct AccountRegistration {
    pub user: UserInsert,
    /// Room to join, created when absent.
    pub room: Option<(RoomNumber, Block)>,
}

/// Persist a new account in one transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    /// Insert the user and, when requested, resolve the room and register
    /// membership.
    async fn register(&self, registration: AccountRegistration)
    -> Result<User, AccountRegistryError>;
}
