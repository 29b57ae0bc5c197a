//! PostgreSQL-backed facility store.
//!
//! [`DieselFacilityStore`] implements the request ledger and the account
//! registry. Each call checks out one connection, opens a transaction and
//! runs the domain's unit of work against a [`DieselFacilityTransaction`]
//! borrowing that connection. A domain error rolls the transaction back.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{
    AccountRegistration, AccountRegistry, AccountRegistryError, FacilityStoreError,
    FacilityTransaction, RequestInsert, RequestLedger, RequestLedgerError, UserInsert,
};
use crate::domain::{
    Block, NewServiceRequest, RequestDescription, RequestStatus, RequestType, Room, RoomId,
    RoomNumber, ServiceRequest, User, UserId, record_request, register_account,
};

use super::error_mapping::StoreFault;
use super::models::{
    NewRequestRow, NewRoomMemberRow, NewRoomRow, NewUserRow, RequestRow, RoomRow, UserRow,
};
use super::pool::DbPool;
use super::schema::{requests, room_members, rooms, users};

fn store_error(error: impl Into<StoreFault>) -> FacilityStoreError {
    let fault: StoreFault = error.into();
    fault.into()
}

/// Error raised out of a Diesel transaction closure.
#[derive(Debug)]
enum UnitOfWorkError<E> {
    Domain(E),
    Diesel(DieselError),
}

impl<E> From<DieselError> for UnitOfWorkError<E> {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl<E> UnitOfWorkError<E>
where
    E: From<StoreFault>,
{
    fn into_port_error(self) -> E {
        match self {
            Self::Domain(error) => error,
            Self::Diesel(error) => StoreFault::from(error).into(),
        }
    }
}

/// [`FacilityTransaction`] over a connection with an open transaction.
pub struct DieselFacilityTransaction<'c> {
    conn: &'c mut AsyncPgConnection,
}

impl<'c> DieselFacilityTransaction<'c> {
    /// Borrow a connection whose transaction the caller owns.
    pub fn new(conn: &'c mut AsyncPgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl FacilityTransaction for DieselFacilityTransaction<'_> {
    async fn find_room_by_id(
        &mut self,
        room_id: RoomId,
    ) -> Result<Option<Room>, FacilityStoreError> {
        let row = rooms::table
            .find(room_id.get())
            .select(RoomRow::as_select())
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(store_error)?;
        row.map(Room::try_from).transpose().map_err(store_error)
    }

    async fn find_room_by_location(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError> {
        let row = rooms::table
            .filter(rooms::block.eq(block.as_str()))
            .filter(rooms::room_number.eq(room_number.as_str()))
            .select(RoomRow::as_select())
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(store_error)?;
        row.map(Room::try_from).transpose().map_err(store_error)
    }

    async fn insert_room_if_absent(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError> {
        let new_room = NewRoomRow {
            block: block.as_str(),
            room_number: room_number.as_str(),
        };
        let row = diesel::insert_into(rooms::table)
            .values(&new_room)
            .on_conflict((rooms::block, rooms::room_number))
            .do_nothing()
            .returning(RoomRow::as_returning())
            .get_result(&mut *self.conn)
            .await
            .optional()
            .map_err(store_error)?;
        row.map(Room::try_from).transpose().map_err(store_error)
    }

    async fn membership_exists(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<bool, FacilityStoreError> {
        diesel::select(exists(
            room_members::table
                .filter(room_members::room_id.eq(room.id().get()))
                .filter(room_members::block.eq(room.block().as_str()))
                .filter(room_members::user_id.eq(*user_id.as_uuid())),
        ))
        .get_result(&mut *self.conn)
        .await
        .map_err(store_error)
    }

    async fn insert_membership(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<(), FacilityStoreError> {
        let member = NewRoomMemberRow {
            room_id: room.id().get(),
            block: room.block().as_str(),
            user_id: *user_id.as_uuid(),
        };
        diesel::insert_into(room_members::table)
            .values(&member)
            .on_conflict_do_nothing()
            .execute(&mut *self.conn)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn active_request_exists(
        &mut self,
        room_id: RoomId,
        request_type: RequestType,
    ) -> Result<bool, FacilityStoreError> {
        diesel::select(exists(
            requests::table
                .filter(requests::room_id.eq(room_id.get()))
                .filter(requests::request_type.eq(request_type.as_str()))
                .filter(requests::status.eq(RequestStatus::Active.as_str())),
        ))
        .get_result(&mut *self.conn)
        .await
        .map_err(store_error)
    }

    async fn insert_request(
        &mut self,
        insert: &RequestInsert,
    ) -> Result<ServiceRequest, FacilityStoreError> {
        let new_request = NewRequestRow {
            user_id: insert.user_id.map(|id| *id.as_uuid()),
            room_id: insert.room_id.get(),
            request_type: insert.request_type.as_str(),
            description: insert.description.as_ref().map(RequestDescription::as_str),
        };
        let row = diesel::insert_into(requests::table)
            .values(&new_request)
            .returning(RequestRow::as_returning())
            .get_result(&mut *self.conn)
            .await
            .map_err(store_error)?;
        ServiceRequest::try_from(row).map_err(store_error)
    }

    async fn insert_user(&mut self, insert: &UserInsert) -> Result<User, FacilityStoreError> {
        let new_user = NewUserRow {
            id: *insert.id.as_uuid(),
            name: insert.name.as_str(),
            email: insert.email.as_ref(),
            password_hash: insert.digest.as_str(),
            block: insert.room_hint.block.as_ref().map(Block::as_str),
            room_number: insert.room_hint.room_number.as_ref().map(RoomNumber::as_str),
            phone: insert.phone.as_deref(),
        };
        let row = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(UserRow::as_returning())
            .get_result(&mut *self.conn)
            .await
            .map_err(store_error)?;
        User::try_from(row).map_err(store_error)
    }
}

/// Diesel-backed request ledger and account registry.
#[derive(Clone)]
pub struct DieselFacilityStore {
    pool: DbPool,
}

impl DieselFacilityStore {
    /// Create a store over the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use facilities_backend::outbound::persistence::{DbPool, DieselFacilityStore, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/facilities")).await?;
    /// let store = DieselFacilityStore::new(pool);
    /// # let _ = store;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestLedger for DieselFacilityStore {
    async fn create_request(
        &self,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, RequestLedgerError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| RequestLedgerError::from(StoreFault::from(err)))?;

        conn.transaction(|conn| {
            async move {
                let mut tx = DieselFacilityTransaction::new(conn);
                record_request(&mut tx, &request)
                    .await
                    .map_err(UnitOfWorkError::Domain)
            }
            .scope_boxed()
        })
        .await
        .map_err(UnitOfWorkError::into_port_error)
    }
}

#[async_trait]
impl AccountRegistry for DieselFacilityStore {
    async fn register(
        &self,
        registration: AccountRegistration,
    ) -> Result<User, AccountRegistryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AccountRegistryError::from(StoreFault::from(err)))?;

        conn.transaction(|conn| {
            async move {
                let mut tx = DieselFacilityTransaction::new(conn);
                register_account(&mut tx, &registration)
                    .await
                    .map_err(UnitOfWorkError::Domain)
            }
            .scope_boxed()
        })
        .await
        .map_err(UnitOfWorkError::into_port_error)
    }
}
