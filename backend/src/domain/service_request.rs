//! Service requests raised by residents against a room.
//!
//! At most one request of a given [`RequestType`] may be
//! [`RequestStatus::Active`] for a room at any time. Storage enforces this
//! with a partial unique index; the ledger checks it first to fail fast.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::room::{Room, RoomId, RoomReference};
use super::user::{User, UserId};

/// Kind of service a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestType {
    /// Room cleaning.
    #[default]
    Cleaning,
    /// Repairs and upkeep.
    Maintenance,
}

/// Raised when a request type is not one of the supported values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported request type: {value}")]
pub struct UnsupportedRequestType {
    /// The rejected input.
    pub value: String,
}

impl RequestType {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
        }
    }
}

impl FromStr for RequestType {
    type Err = UnsupportedRequestType;

    /// Parse case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cleaning" => Ok(Self::Cleaning),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(UnsupportedRequestType {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

/// Raised when a stored status is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown request status: {value}")]
pub struct UnknownRequestStatus {
    /// The rejected input.
    pub value: String,
}

impl RequestStatus {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownRequestStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownRequestStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Free-text description; never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescription(String);

impl RequestDescription {
    /// Trim the input; blank text collapses to `None`.
    ///
    /// # Examples
    /// ```
    /// use facilities_backend::domain::RequestDescription;
    ///
    /// assert!(RequestDescription::normalise(Some("  \n\t ")).is_none());
    /// let kept = RequestDescription::normalise(Some("  leaking tap ")).expect("kept");
    /// assert_eq!(kept.as_str(), "leaking tap");
    /// ```
    #[must_use]
    pub fn normalise(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Self(text.to_owned()))
    }

    /// Description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Surrogate request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceRequestId(i32);

impl ServiceRequestId {
    /// Wrap a stored identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ServiceRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field bundle used to construct a [`ServiceRequest`].
#[derive(Debug, Clone)]
pub struct ServiceRequestDraft {
    pub id: ServiceRequestId,
    pub room_id: RoomId,
    pub user_id: Option<UserId>,
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub description: Option<RequestDescription>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    id: ServiceRequestId,
    room_id: RoomId,
    user_id: Option<UserId>,
    request_type: RequestType,
    status: RequestStatus,
    description: Option<RequestDescription>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRequestDraft> for ServiceRequest {
    fn from(draft: ServiceRequestDraft) -> Self {
        let ServiceRequestDraft {
            id,
            room_id,
            user_id,
            request_type,
            status,
            description,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            room_id,
            user_id,
            request_type,
            status,
            description,
            created_at,
            updated_at,
        }
    }
}

impl ServiceRequest {
    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> ServiceRequestId {
        self.id
    }

    /// Room the request was raised against.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Requesting user, if known and not deleted.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Kind of service requested.
    #[must_use]
    pub const fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().map(RequestDescription::as_str)
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated input to one request-creation unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRequest {
    pub room: RoomReference,
    pub request_type: RequestType,
    pub description: Option<RequestDescription>,
    pub user_id: Option<UserId>,
}

/// Active request joined with its room and requester for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRequest {
    pub request: ServiceRequest,
    pub room: Room,
    pub requester: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cleaning", RequestType::Cleaning)]
    #[case("  Cleaning ", RequestType::Cleaning)]
    #[case("MAINTENANCE", RequestType::Maintenance)]
    #[case("\tmaintenance\n", RequestType::Maintenance)]
    fn request_type_parses_case_insensitively(#[case] raw: &str, #[case] expected: RequestType) {
        assert_eq!(raw.parse::<RequestType>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("laundry")]
    #[case("clean ing")]
    fn request_type_rejects_unknown_values(#[case] raw: &str) {
        let error = raw.parse::<RequestType>().expect_err("unsupported type");
        assert_eq!(error.value, raw);
    }

    #[rstest]
    #[case(RequestStatus::Active)]
    #[case(RequestStatus::Completed)]
    #[case(RequestStatus::Cancelled)]
    fn status_parses_its_own_representation(#[case] status: RequestStatus) {
        assert_eq!(status.as_str().parse::<RequestStatus>(), Ok(status));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   \t\n"))]
    fn blank_descriptions_collapse_to_none(#[case] raw: Option<&str>) {
        assert!(RequestDescription::normalise(raw).is_none());
    }
}
