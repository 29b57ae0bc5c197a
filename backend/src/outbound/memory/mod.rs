//! In-process facility store.
//!
//! Serves the API when no database is configured and backs HTTP tests. A
//! unit of work runs against a staged copy of the state while the store's
//! lock is held; the copy replaces the state only when the work succeeds,
//! so a failed call leaves no partial writes behind.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::ports::{
    AccountRegistration, AccountRegistry, AccountRegistryError, ActiveRequestRepository,
    ActiveRequestRepositoryError, FacilityStoreError, FacilityTransaction, RequestInsert,
    RequestLedger, RequestLedgerError, UserInsert, UserRepository, UserRepositoryError,
};
use crate::domain::{
    ActiveRequest, Block, EmailAddress, NewServiceRequest, PasswordDigest, RequestStatus,
    RequestType, Room, RoomId, RoomNumber, ServiceRequest, ServiceRequestDraft, ServiceRequestId,
    StoredCredentials, User, UserDraft, UserId, record_request, register_account,
};

#[derive(Debug, Clone, Default)]
struct FacilityState {
    rooms: Vec<Room>,
    members: Vec<(RoomId, Block, UserId)>,
    requests: Vec<ServiceRequest>,
    users: Vec<(User, PasswordDigest)>,
    last_room_id: i64,
    last_request_id: i32,
}

impl FacilityState {
    fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id() == room_id)
    }

    fn room_at(&self, block: &Block, room_number: &RoomNumber) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|room| room.block() == block && room.room_number() == room_number)
    }

    fn user(&self, user_id: &UserId) -> Option<&User> {
        self.users
            .iter()
            .map(|(user, _)| user)
            .find(|user| user.id() == user_id)
    }

    fn has_active(&self, room_id: RoomId, request_type: RequestType) -> bool {
        self.requests.iter().any(|request| {
            request.room_id() == room_id
                && request.request_type() == request_type
                && request.status() == RequestStatus::Active
        })
    }
}

/// Staged copy of the state for one unit of work.
struct MemoryTransaction {
    state: FacilityState,
}

#[async_trait]
impl FacilityTransaction for MemoryTransaction {
    async fn find_room_by_id(
        &mut self,
        room_id: RoomId,
    ) -> Result<Option<Room>, FacilityStoreError> {
        Ok(self.state.room(room_id).cloned())
    }

    async fn find_room_by_location(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError> {
        Ok(self.state.room_at(block, room_number).cloned())
    }

    async fn insert_room_if_absent(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError> {
        if self.state.room_at(block, room_number).is_some() {
            return Ok(None);
        }
        let next = self.state.last_room_id + 1;
        let room_id = RoomId::new(next).map_err(|err| FacilityStoreError::query(err.to_string()))?;
        let room = Room::new(room_id, block.clone(), room_number.clone(), Utc::now());
        self.state.last_room_id = next;
        self.state.rooms.push(room.clone());
        Ok(Some(room))
    }

    async fn membership_exists(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<bool, FacilityStoreError> {
        Ok(self.state.members.iter().any(|(room_id, block, member)| {
            *room_id == room.id() && block == room.block() && member == user_id
        }))
    }

    async fn insert_membership(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<(), FacilityStoreError> {
        if !self.membership_exists(room, user_id).await? {
            self.state
                .members
                .push((room.id(), room.block().clone(), *user_id));
        }
        Ok(())
    }

    async fn active_request_exists(
        &mut self,
        room_id: RoomId,
        request_type: RequestType,
    ) -> Result<bool, FacilityStoreError> {
        Ok(self.state.has_active(room_id, request_type))
    }

    async fn insert_request(
        &mut self,
        insert: &RequestInsert,
    ) -> Result<ServiceRequest, FacilityStoreError> {
        if self.state.has_active(insert.room_id, insert.request_type) {
            return Err(FacilityStoreError::active_request_conflict());
        }
        if self.state.room(insert.room_id).is_none() {
            return Err(FacilityStoreError::query(format!(
                "room {} does not exist",
                insert.room_id
            )));
        }
        let id = self.state.last_request_id + 1;
        let now = Utc::now();
        let request = ServiceRequest::from(ServiceRequestDraft {
            id: ServiceRequestId::new(id),
            room_id: insert.room_id,
            user_id: insert.user_id,
            request_type: insert.request_type,
            status: RequestStatus::Active,
            description: insert.description.clone(),
            created_at: now,
            updated_at: now,
        });
        self.state.last_request_id = id;
        self.state.requests.push(request.clone());
        Ok(request)
    }

    async fn insert_user(&mut self, insert: &UserInsert) -> Result<User, FacilityStoreError> {
        if self
            .state
            .users
            .iter()
            .any(|(user, _)| user.email() == &insert.email)
        {
            return Err(FacilityStoreError::email_taken());
        }
        let user = User::new(UserDraft {
            id: insert.id,
            name: insert.name.clone(),
            email: insert.email.clone(),
            phone: insert.phone.clone(),
            room_hint: insert.room_hint.clone(),
            created_at: Utc::now(),
        })
        .map_err(|err| FacilityStoreError::query(err.to_string()))?;
        self.state.users.push((user.clone(), insert.digest.clone()));
        Ok(user)
    }
}

/// Mutex-guarded facility store implementing every driven port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFacilityStore {
    state: Arc<Mutex<FacilityState>>,
}

impl InMemoryFacilityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestLedger for InMemoryFacilityStore {
    async fn create_request(
        &self,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, RequestLedgerError> {
        let mut state = self.state.lock().await;
        let mut tx = MemoryTransaction {
            state: state.clone(),
        };
        let created = record_request(&mut tx, &request).await?;
        *state = tx.state;
        Ok(created)
    }
}

#[async_trait]
impl AccountRegistry for InMemoryFacilityStore {
    async fn register(
        &self,
        registration: AccountRegistration,
    ) -> Result<User, AccountRegistryError> {
        let mut state = self.state.lock().await;
        let mut tx = MemoryTransaction {
            state: state.clone(),
        };
        let user = register_account(&mut tx, &registration).await?;
        *state = tx.state;
        Ok(user)
    }
}

#[async_trait]
impl ActiveRequestRepository for InMemoryFacilityStore {
    async fn find_room_by_id(
        &self,
        room_id: RoomId,
    ) -> Result<Option<Room>, ActiveRequestRepositoryError> {
        Ok(self.state.lock().await.room(room_id).cloned())
    }

    async fn find_room_by_location(
        &self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, ActiveRequestRepositoryError> {
        Ok(self.state.lock().await.room_at(block, room_number).cloned())
    }

    async fn find_active_request(
        &self,
        room_id: RoomId,
        request_type: RequestType,
    ) -> Result<Option<ActiveRequest>, ActiveRequestRepositoryError> {
        let state = self.state.lock().await;
        let Some(room) = state.room(room_id) else {
            return Ok(None);
        };
        let found = state.requests.iter().find(|request| {
            request.room_id() == room_id
                && request.request_type() == request_type
                && request.status() == RequestStatus::Active
        });
        Ok(found.map(|request| ActiveRequest {
            request: request.clone(),
            room: room.clone(),
            requester: request
                .user_id()
                .and_then(|user_id| state.user(user_id))
                .cloned(),
        }))
    }
}

#[async_trait]
impl UserRepository for InMemoryFacilityStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.state.lock().await.user(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .iter()
            .find(|(user, _)| user.email() == email)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .iter()
            .find(|(user, _)| user.email() == email)
            .map(|(user, digest)| StoredCredentials {
                user: user.clone(),
                digest: digest.clone(),
            }))
    }
}
