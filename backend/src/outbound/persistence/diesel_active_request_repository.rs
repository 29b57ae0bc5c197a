//! PostgreSQL-backed read adapter for active requests.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ActiveRequestRepository, ActiveRequestRepositoryError};
use crate::domain::{ActiveRequest, Block, RequestStatus, RequestType, Room, RoomId, RoomNumber};

use super::error_mapping::StoreFault;
use super::models::{RequestRow, RoomRow, UserRow};
use super::pool::DbPool;
use super::schema::{requests, rooms, users};

fn repository_error(error: impl Into<StoreFault>) -> ActiveRequestRepositoryError {
    let fault: StoreFault = error.into();
    fault.into()
}

/// Diesel-backed implementation of [`ActiveRequestRepository`].
#[derive(Clone)]
pub struct DieselActiveRequestRepository {
    pool: DbPool,
}

impl DieselActiveRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActiveRequestRepository for DieselActiveRequestRepository {
    async fn find_room_by_id(
        &self,
        room_id: RoomId,
    ) -> Result<Option<Room>, ActiveRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(repository_error)?;
        let row = rooms::table
            .find(room_id.get())
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(repository_error)?;
        row.map(Room::try_from).transpose().map_err(repository_error)
    }

    async fn find_room_by_location(
        &self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, ActiveRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(repository_error)?;
        let row = rooms::table
            .filter(rooms::block.eq(block.as_str()))
            .filter(rooms::room_number.eq(room_number.as_str()))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(repository_error)?;
        row.map(Room::try_from).transpose().map_err(repository_error)
    }

    async fn find_active_request(
        &self,
        room_id: RoomId,
        request_type: RequestType,
    ) -> Result<Option<ActiveRequest>, ActiveRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(repository_error)?;
        let found = requests::table
            .inner_join(rooms::table)
            .left_join(users::table)
            .filter(requests::room_id.eq(room_id.get()))
            .filter(requests::request_type.eq(request_type.as_str()))
            .filter(requests::status.eq(RequestStatus::Active.as_str()))
            .order(requests::created_at.desc())
            .select((
                RequestRow::as_select(),
                RoomRow::as_select(),
                Option::<UserRow>::as_select(),
            ))
            .first::<(RequestRow, RoomRow, Option<UserRow>)>(&mut conn)
            .await
            .optional()
            .map_err(repository_error)?;

        let Some((request, room, requester)) = found else {
            return Ok(None);
        };
        Ok(Some(ActiveRequest {
            request: request.try_into().map_err(repository_error)?,
            room: room.try_into().map_err(repository_error)?,
            requester: requester
                .map(TryInto::try_into)
                .transpose()
                .map_err(repository_error)?,
        }))
    }
}
