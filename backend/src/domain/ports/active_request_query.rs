//! Driving port for looking up a room's active request.

use async_trait::async_trait;

use crate::domain::{ActiveRequest, Error, RoomId};

/// Request payload for [`ActiveRequestQuery::find_active`].
///
/// A missing or blank `request_type` means cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindActiveRequest {
    pub room_id: Option<RoomId>,
    pub room_number: Option<String>,
    pub block: Option<String>,
    pub request_type: Option<String>,
}

/// Use-case port for reading the active request of a room.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActiveRequestQuery: Send + Sync {
    /// Return the active request, or `None` when the room or request is absent.
    async fn find_active(&self, request: FindActiveRequest) -> Result<Option<ActiveRequest>, Error>;
}
