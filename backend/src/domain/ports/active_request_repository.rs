//! Driven port for read-only active-request lookups.
//!
//! Lookups never create rows. Absence is `Ok(None)`; faults are `Err`.

use async_trait::async_trait;

use crate::domain::{ActiveRequest, Block, RequestType, Room, RoomId, RoomNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by active-request reads.
    pub enum ActiveRequestRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "active request repository connection failed: {message}",
        /// A query failed or returned unusable data.
        Query { message: String } => "active request repository query failed: {message}",
    }
}

/// Read-side store access for the active-request query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActiveRequestRepository: Send + Sync {
    /// Fetch a room by surrogate id.
    async fn find_room_by_id(
        &self,
        room_id: RoomId,
    ) -> Result<Option<Room>, ActiveRequestRepositoryError>;

    /// Fetch a room by its `(block, room_number)` pair.
    async fn find_room_by_location(
        &self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, ActiveRequestRepositoryError>;

    /// Fetch the active request of `request_type` for the room, joined with
    /// its room and requester.
    async fn find_active_request(
        &self,
        room_id: RoomId,
        request_type: RequestType,
    ) -> Result<Option<ActiveRequest>, ActiveRequestRepositoryError>;
}
