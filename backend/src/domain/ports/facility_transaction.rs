//! Storage operations available inside one unit of work.
//!
//! Adapters hand a [`FacilityTransaction`] to the domain's room resolver,
//! membership registrar and request ledger while holding a store transaction
//! open. Returning an error from the domain aborts the transaction.

use async_trait::async_trait;

use crate::domain::{
    Block, EmailAddress, PasswordDigest, RequestDescription, RequestType, Room, RoomHint, RoomId,
    RoomNumber, ServiceRequest, User, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Failures raised by storage operations inside a unit of work.
    pub enum FacilityStoreError {
        /// The store could not be reached.
        Connection { message: String } => "facility store connection failed: {message}",
        /// A statement failed or returned unusable data.
        Query { message: String } => "facility store query failed: {message}",
        /// The partial unique index on active requests rejected an insert.
        ActiveRequestConflict => "an active request already exists for this room and type",
        /// The unique email constraint rejected a user insert.
        EmailTaken => "email address is already registered",
    }
}

/// Row data for a request insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInsert {
    pub room_id: RoomId,
    pub user_id: Option<UserId>,
    pub request_type: RequestType,
    pub description: Option<RequestDescription>,
}

/// Row data for a user insert.
#[derive(Debug, Clone)]
pub struct UserInsert {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub digest: PasswordDigest,
    pub phone: Option<String>,
    pub room_hint: RoomHint,
}

/// Transaction-scoped store handle.
#[async_trait]
pub trait FacilityTransaction: Send {
    /// Fetch a room by surrogate id.
    async fn find_room_by_id(&mut self, room_id: RoomId)
    -> Result<Option<Room>, FacilityStoreError>;

    /// Fetch a room by its `(block, room_number)` pair.
    async fn find_room_by_location(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError>;

    /// Insert a room unless the pair already exists.
    ///
    /// Returns `None` when another writer owns the pair.
    async fn insert_room_if_absent(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError>;

    /// Whether the `(room, block, user)` membership edge exists.
    async fn membership_exists(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<bool, FacilityStoreError>;

    /// Insert a membership edge; an existing edge is left untouched.
    async fn insert_membership(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<(), FacilityStoreError>;

    /// Whether an active request of `request_type` exists for the room.
    async fn active_request_exists(
        &mut self,
        room_id: RoomId,
        request_type: RequestType,
    ) -> Result<bool, FacilityStoreError>;

    /// Insert an active request and return the stored row.
    async fn insert_request(
        &mut self,
        insert: &RequestInsert,
    ) -> Result<ServiceRequest, FacilityStoreError>;

    /// Insert a user and return the stored row.
    async fn insert_user(&mut self, insert: &UserInsert) -> Result<User, FacilityStoreError>;
}
