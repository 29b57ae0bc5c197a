//! Driven port for the atomic request-creation unit of work.

use async_trait::async_trait;

use crate::domain::{NewServiceRequest, ServiceRequest};

use super::define_port_error;

define_port_error! {
    /// Outcomes of a failed request-creation unit of work.
    pub enum RequestLedgerError {
        /// An explicit room id does not exist.
        RoomNotFound { room_id: i32 } => "room {room_id} not found",
        /// The supplied block disagrees with the room's stored block.
        RoomMismatch { room_id: i32, block: String } => "room {room_id} does not belong to block {block}",
        /// A concurrent writer created the room but it is not yet visible.
        RoomConflict { block: String, room_number: String } => "room {room_number} in block {block} is being created concurrently",
        /// The room already has an active request of this type.
        ActiveRequestExists { room_id: i32, request_type: String } => "an active {request_type} request already exists for room {room_id}",
        /// The store could not be reached.
        Connection { message: String } => "request ledger connection failed: {message}",
        /// A statement failed.
        Query { message: String } => "request ledger query failed: {message}",
    }
}

/// Run room resolution, membership registration and request insertion as
/// one all-or-nothing unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestLedger: Send + Sync {
    /// Create an active request, returning the stored row.
    async fn create_request(
        &self,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, RequestLedgerError>;
}
