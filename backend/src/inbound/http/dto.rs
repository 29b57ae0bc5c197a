//! Response payloads shared by the service-request and account handlers.
//!
//! Timestamps are RFC 3339 strings and identifiers keep their native JSON
//! types: room and request ids are numbers, user ids are UUID strings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ActiveRequest, Room, ServiceRequest, User};

/// Room payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "BlockA")]
    pub block: String,
    #[schema(example = "101")]
    pub room_number: String,
    pub created_at: String,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id().get(),
            block: room.block().to_string(),
            room_number: room.room_number().to_string(),
            created_at: room.created_at().to_rfc3339(),
        }
    }
}

/// User payload. Credentials never leave the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
    pub phone: Option<String>,
    /// Self-declared block from sign-up; advisory only.
    pub block: Option<String>,
    /// Self-declared room number from sign-up; advisory only.
    pub room_number: Option<String>,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let hint = user.room_hint();
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().to_string(),
            phone: user.phone().map(str::to_owned),
            block: hint.block.as_ref().map(ToString::to_string),
            room_number: hint.room_number.as_ref().map(ToString::to_string),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Service request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = 7)]
    pub room_id: i32,
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "cleaning")]
    pub request_type: String,
    #[schema(example = "active")]
    pub status: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&ServiceRequest> for ServiceRequestResponse {
    fn from(request: &ServiceRequest) -> Self {
        Self {
            id: request.id().get(),
            room_id: request.room_id().get(),
            user_id: request.user_id().map(ToString::to_string),
            request_type: request.request_type().to_string(),
            status: request.status().as_str().to_owned(),
            description: request.description().map(str::to_owned),
            created_at: request.created_at().to_rfc3339(),
            updated_at: request.updated_at().to_rfc3339(),
        }
    }
}

/// Active request joined with its room and, when known, its requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRequestResponse {
    #[serde(flatten)]
    pub request: ServiceRequestResponse,
    pub room: RoomResponse,
    pub requester: Option<UserResponse>,
}

impl From<&ActiveRequest> for ActiveRequestResponse {
    fn from(active: &ActiveRequest) -> Self {
        Self {
            request: ServiceRequestResponse::from(&active.request),
            room: RoomResponse::from(&active.room),
            requester: active.requester.as_ref().map(UserResponse::from),
        }
    }
}
