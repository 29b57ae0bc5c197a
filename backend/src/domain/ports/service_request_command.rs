//! Driving port for raising service requests.
//!
//! Inbound adapters pass loosely typed fields; the domain normalises the
//! request type, the description and the room reference.

use async_trait::async_trait;

use crate::domain::{Error, RoomId, ServiceRequest, UserId};

/// Request payload for [`ServiceRequestCommand::create_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateServiceRequest {
    pub request_type: String,
    pub description: Option<String>,
    pub user_id: Option<UserId>,
    pub room_id: Option<RoomId>,
    pub room_number: Option<String>,
    pub block: Option<String>,
}

/// Use-case port for creating service requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRequestCommand: Send + Sync {
    /// Create an active request for the referenced room.
    async fn create_request(&self, request: CreateServiceRequest) -> Result<ServiceRequest, Error>;
}
