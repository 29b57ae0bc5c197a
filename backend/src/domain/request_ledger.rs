//! Service request creation.
//!
//! [`record_request`] is the body of the unit of work: it resolves the room,
//! registers membership, checks the one-active-request rule and inserts the
//! request. Adapters run it inside a store transaction.
//! [`ServiceRequestService`] implements the driving port around it: input
//! normalisation, the user's room hint, the deadline and error mapping.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::membership::ensure_member;
use super::ports::{
    CreateServiceRequest, FacilityStoreError, FacilityTransaction, RequestInsert, RequestLedger,
    RequestLedgerError, ServiceRequestCommand, UserRepository, UserRepositoryError,
};
use super::room_resolver::{RoomResolutionError, resolve_room};
use super::{
    Error, NewServiceRequest, RequestDescription, RequestType, RoomReference, ServiceRequest,
    User, UserId,
};

/// Deadline applied to one request-creation unit of work.
pub const DEFAULT_CREATE_DEADLINE: Duration = Duration::from_secs(5);

impl From<FacilityStoreError> for RequestLedgerError {
    fn from(error: FacilityStoreError) -> Self {
        match error {
            FacilityStoreError::Connection { message } => Self::connection(message),
            FacilityStoreError::Query { message } => Self::query(message),
            other @ (FacilityStoreError::ActiveRequestConflict | FacilityStoreError::EmailTaken) => {
                Self::query(other.to_string())
            }
        }
    }
}

impl From<RoomResolutionError> for RequestLedgerError {
    fn from(error: RoomResolutionError) -> Self {
        match error {
            RoomResolutionError::NotFound { room_id } => Self::room_not_found(room_id.get()),
            RoomResolutionError::Mismatch {
                room_id, supplied, ..
            } => Self::room_mismatch(room_id.get(), supplied.as_str()),
            RoomResolutionError::Conflict { block, room_number } => {
                Self::room_conflict(block.as_str(), room_number.as_str())
            }
            RoomResolutionError::Store(store) => store.into(),
        }
    }
}

/// Resolve the room, register membership and insert an active request.
///
/// Any error must abort the surrounding transaction.
pub async fn record_request(
    tx: &mut dyn FacilityTransaction,
    request: &NewServiceRequest,
) -> Result<ServiceRequest, RequestLedgerError> {
    let room = resolve_room(tx, &request.room).await?;

    if let Some(user_id) = request.user_id.as_ref() {
        ensure_member(tx, &room, user_id).await?;
    }

    let request_type = request.request_type;
    let active_exists =
        || RequestLedgerError::active_request_exists(room.id().get(), request_type.as_str());

    if tx.active_request_exists(room.id(), request_type).await? {
        return Err(active_exists());
    }

    let insert = RequestInsert {
        room_id: room.id(),
        user_id: request.user_id,
        request_type,
        description: request.description.clone(),
    };
    tx.insert_request(&insert).await.map_err(|err| match err {
        FacilityStoreError::ActiveRequestConflict => active_exists(),
        other => other.into(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Map identity-store faults for the services that read users.
pub(super) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable("user store unavailable")
        }
        UserRepositoryError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_ledger_error(error: RequestLedgerError) -> Error {
    match error {
        RequestLedgerError::RoomNotFound { room_id } => {
            Error::not_found("Room not found").with_details(json!({ "roomId": room_id }))
        }
        RequestLedgerError::RoomMismatch { room_id, block } => {
            Error::invalid_request("Room does not belong to the given block")
                .with_details(json!({ "roomId": room_id, "block": block }))
        }
        RequestLedgerError::ActiveRequestExists {
            room_id,
            request_type,
        } => Error::conflict(format!(
            "An active {request_type} request already exists for this room"
        ))
        .with_details(json!({ "roomId": room_id, "type": request_type })),
        RequestLedgerError::RoomConflict { block, room_number } => {
            warn!(%block, %room_number, "room creation raced a concurrent writer");
            Error::service_unavailable("Room is being created concurrently; retry the request")
        }
        RequestLedgerError::Connection { message } => {
            error!(%message, "request ledger unavailable");
            Error::service_unavailable("request store unavailable")
        }
        RequestLedgerError::Query { message } => {
            error!(%message, "request ledger query failed");
            Error::internal(format!("request ledger error: {message}"))
        }
    }
}

/// Service request use-cases backed by a [`RequestLedger`] and the
/// identity store.
#[derive(Clone)]
pub struct ServiceRequestService<L, U> {
    ledger: Arc<L>,
    users: Arc<U>,
    deadline: Duration,
}

impl<L, U> ServiceRequestService<L, U> {
    /// Create a service with the [`DEFAULT_CREATE_DEADLINE`].
    pub fn new(ledger: Arc<L>, users: Arc<U>) -> Self {
        Self {
            ledger,
            users,
            deadline: DEFAULT_CREATE_DEADLINE,
        }
    }

    /// Override the deadline for one unit of work.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

impl<L, U> ServiceRequestService<L, U>
where
    U: UserRepository,
{
    async fn load_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                Error::not_found("User not found").with_details(json!({ "userId": user_id }))
            })
    }

    /// Build the room reference, filling gaps from the user's room hint when
    /// no explicit id was given.
    async fn room_reference(&self, request: &CreateServiceRequest) -> Result<RoomReference, Error> {
        let mut room_number = non_blank(request.room_number.clone());
        let mut block = non_blank(request.block.clone());

        if let Some(user_id) = request.user_id.as_ref() {
            let user = self.load_user(user_id).await?;
            if request.room_id.is_none() {
                let hint = user.room_hint();
                room_number = room_number
                    .or_else(|| hint.room_number.as_ref().map(|value| value.as_str().to_owned()));
                block = block.or_else(|| hint.block.as_ref().map(|value| value.as_str().to_owned()));
            }
        }

        RoomReference::from_parts(request.room_id, room_number.as_deref(), block.as_deref())
            .map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "room", "code": "missing_room_reference" }))
            })
    }
}

#[async_trait]
impl<L, U> ServiceRequestCommand for ServiceRequestService<L, U>
where
    L: RequestLedger,
    U: UserRepository,
{
    async fn create_request(&self, request: CreateServiceRequest) -> Result<ServiceRequest, Error> {
        let request_type = request.request_type.parse::<RequestType>().map_err(|err| {
            Error::invalid_request("Unsupported request type")
                .with_details(json!({ "field": "type", "value": err.value }))
        })?;
        let description = RequestDescription::normalise(request.description.as_deref());
        let room = self.room_reference(&request).await?;

        let new_request = NewServiceRequest {
            room,
            request_type,
            description,
            user_id: request.user_id,
        };
        debug!(?new_request, "creating service request");

        let created = tokio::time::timeout(self.deadline, self.ledger.create_request(new_request))
            .await
            .map_err(|_| {
                warn!(deadline = ?self.deadline, "service request creation timed out");
                Error::service_unavailable("request creation timed out")
            })?
            .map_err(map_ledger_error)?;

        info!(
            request_id = %created.id(),
            room_id = %created.room_id(),
            request_type = %created.request_type(),
            "service request created"
        );
        Ok(created)
    }
}

#[cfg(test)]
#[path = "request_ledger_tests.rs"]
mod tests;
