//! Active request lookup.
//!
//! Reads never create rooms. An unknown room and a room without an active
//! request both answer `None`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use super::ports::{
    ActiveRequestQuery, ActiveRequestRepository, ActiveRequestRepositoryError, FindActiveRequest,
};
use super::room_resolver::{RoomResolutionError, check_block};
use super::{ActiveRequest, Error, RequestType, Room, RoomReference};

fn map_repository_error(error: ActiveRequestRepositoryError) -> Error {
    match error {
        ActiveRequestRepositoryError::Connection { message } => {
            error!(%message, "active request repository unavailable");
            Error::service_unavailable("request store unavailable")
        }
        ActiveRequestRepositoryError::Query { message } => {
            error!(%message, "active request repository query failed");
            Error::internal(format!("active request repository error: {message}"))
        }
    }
}

fn parse_request_type(raw: Option<&str>) -> Result<RequestType, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(RequestType::default()),
        Some(value) => value.parse().map_err(|_| {
            Error::invalid_request("Unsupported request type")
                .with_details(json!({ "field": "type", "value": value }))
        }),
    }
}

/// [`ActiveRequestQuery`] implementation over an [`ActiveRequestRepository`].
#[derive(Clone)]
pub struct ActiveRequestService<R> {
    repository: Arc<R>,
}

impl<R> ActiveRequestService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ActiveRequestService<R>
where
    R: ActiveRequestRepository,
{
    async fn locate(&self, reference: &RoomReference) -> Result<Option<Room>, Error> {
        match reference {
            RoomReference::Id { room_id, block } => {
                let Some(room) = self
                    .repository
                    .find_room_by_id(*room_id)
                    .await
                    .map_err(map_repository_error)?
                else {
                    return Ok(None);
                };
                check_block(&room, block.as_ref()).map_err(|err| match err {
                    RoomResolutionError::Mismatch {
                        room_id, supplied, ..
                    } => Error::invalid_request("Room does not belong to the given block")
                        .with_details(json!({ "roomId": room_id.get(), "block": supplied.as_str() })),
                    other => Error::internal(other.to_string()),
                })?;
                Ok(Some(room))
            }
            RoomReference::Location { room_number, block } => self
                .repository
                .find_room_by_location(block, room_number)
                .await
                .map_err(map_repository_error),
        }
    }
}

#[async_trait]
impl<R> ActiveRequestQuery for ActiveRequestService<R>
where
    R: ActiveRequestRepository,
{
    async fn find_active(&self, request: FindActiveRequest) -> Result<Option<ActiveRequest>, Error> {
        let request_type = parse_request_type(request.request_type.as_deref())?;
        let reference = RoomReference::from_parts(
            request.room_id,
            request.room_number.as_deref(),
            request.block.as_deref(),
        )
        .map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "room", "code": "missing_room_reference" }))
        })?;

        let Some(room) = self.locate(&reference).await? else {
            debug!(?reference, "no room matches the active request lookup");
            return Ok(None);
        };

        self.repository
            .find_active_request(room.id(), request_type)
            .await
            .map_err(map_repository_error)
    }
}
