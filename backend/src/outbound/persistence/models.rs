//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types validate
//! stored values and fail with [`RowConversionError`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Block, EmailAddress, PasswordDigest, RequestDescription, Room, RoomHint, RoomId, RoomNumber,
    ServiceRequest, ServiceRequestDraft, ServiceRequestId, StoredCredentials, User, UserDraft,
    UserId,
};

use super::schema::{requests, room_members, rooms, users};

/// A stored row could not be converted into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {table} row: {message}")]
pub(crate) struct RowConversionError {
    pub table: &'static str,
    pub message: String,
}

impl RowConversionError {
    fn new(table: &'static str, error: impl std::fmt::Display) -> Self {
        Self {
            table,
            message: error.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub block: Option<String>,
    pub room_number: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub block: Option<&'a str>,
    pub room_number: Option<&'a str>,
    pub phone: Option<&'a str>,
}

impl UserRow {
    fn room_hint(&self) -> RoomHint {
        // Hints are advisory; unusable stored values are dropped.
        RoomHint {
            block: self.block.as_deref().and_then(|value| Block::new(value).ok()),
            room_number: self
                .room_number
                .as_deref()
                .and_then(|value| RoomNumber::new(value).ok()),
        }
    }

    /// Split into the domain user and the stored digest.
    pub fn into_credentials(self) -> Result<StoredCredentials, RowConversionError> {
        let digest = PasswordDigest::new(self.password_hash.clone());
        let user = User::try_from(self)?;
        Ok(StoredCredentials { user, digest })
    }
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let room_hint = row.room_hint();
        let email = EmailAddress::new(&row.email).map_err(|err| RowConversionError::new("users", err))?;
        User::new(UserDraft {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email,
            phone: row.phone,
            room_hint,
            created_at: row.created_at,
        })
        .map_err(|err| RowConversionError::new("users", err))
    }
}

// ---------------------------------------------------------------------------
// Rooms and membership
// ---------------------------------------------------------------------------

/// Row struct for reading from the rooms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: i32,
    pub block: String,
    pub room_number: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating rooms.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub(crate) struct NewRoomRow<'a> {
    pub block: &'a str,
    pub room_number: &'a str,
}

impl TryFrom<RoomRow> for Room {
    type Error = RowConversionError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let invalid = |err| RowConversionError::new("rooms", err);
        Ok(Room::new(
            RoomId::new(i64::from(row.id)).map_err(invalid)?,
            Block::new(&row.block).map_err(invalid)?,
            RoomNumber::new(&row.room_number).map_err(invalid)?,
            row.created_at,
        ))
    }
}

/// Insertable membership edge.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = room_members)]
pub(crate) struct NewRoomMemberRow<'a> {
    pub room_id: i32,
    pub block: &'a str,
    pub user_id: Uuid,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Row struct for reading from the requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RequestRow {
    pub id: i32,
    pub user_id: Option<Uuid>,
    pub room_id: i32,
    pub request_type: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating requests; status defaults to active.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = requests)]
pub(crate) struct NewRequestRow<'a> {
    pub user_id: Option<Uuid>,
    pub room_id: i32,
    pub request_type: &'a str,
    pub description: Option<&'a str>,
}

impl TryFrom<RequestRow> for ServiceRequest {
    type Error = RowConversionError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        let invalid = |err: &dyn std::fmt::Display| RowConversionError::new("requests", err);
        Ok(ServiceRequest::from(ServiceRequestDraft {
            id: ServiceRequestId::new(row.id),
            room_id: RoomId::new(i64::from(row.room_id)).map_err(|err| invalid(&err))?,
            user_id: row.user_id.map(UserId::from_uuid),
            request_type: row.request_type.parse().map_err(|err| invalid(&err))?,
            status: row.status.parse().map_err(|err| invalid(&err))?,
            description: RequestDescription::normalise(row.description.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
