//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, and the services that coordinate room resolution,
//! membership and service requests.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Room, RoomReference: rooms scoped by block.
//! - ServiceRequest, ActiveRequest: service requests and their read model.
//! - User: resident identity with an advisory room hint.
//! - ServiceRequestService, ActiveRequestService, AccountService: driving
//!   port implementations.

pub mod account_service;
pub mod active_request_service;
pub mod error;
pub mod membership;
pub mod ports;
pub mod request_ledger;
pub mod room;
pub mod room_resolver;
pub mod service_request;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::account_service::{AccountService, register_account};
pub use self::active_request_service::ActiveRequestService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::request_ledger::{DEFAULT_CREATE_DEADLINE, ServiceRequestService, record_request};
pub use self::room::{Block, Room, RoomId, RoomNumber, RoomReference, RoomValidationError};
pub use self::room_resolver::RoomResolutionError;
pub use self::service_request::{
    ActiveRequest, NewServiceRequest, RequestDescription, RequestStatus, RequestType,
    ServiceRequest, ServiceRequestDraft, ServiceRequestId, UnknownRequestStatus,
    UnsupportedRequestType,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PASSWORD_MIN_LENGTH, PasswordDigest, RoomHint, StoredCredentials, User,
    UserDraft, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use facilities_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
