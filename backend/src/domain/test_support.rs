//! Scripted [`FacilityTransaction`] double for unit-of-work tests.

use async_trait::async_trait;
use chrono::Utc;

use super::ports::{FacilityStoreError, FacilityTransaction, RequestInsert, UserInsert};
use super::{
    Block, RequestStatus, RequestType, Room, RoomId, RoomNumber, ServiceRequest,
    ServiceRequestDraft, ServiceRequestId, User, UserDraft, UserId,
};

/// Vec-backed transaction with failure injection. It does not roll back;
/// tests inspect the writes attempted before an error.
#[derive(Debug, Default)]
pub(crate) struct StubFacility {
    pub rooms: Vec<Room>,
    pub members: Vec<(RoomId, Block, UserId)>,
    pub requests: Vec<ServiceRequest>,
    pub users: Vec<User>,
    /// Next room insert loses to a writer whose row stays invisible.
    pub lose_room_insert_invisibly: bool,
    /// Next room insert loses to a writer whose row is already committed.
    pub lose_room_insert_to: Option<Room>,
    /// The pre-insert active check misses a concurrent insert.
    pub miss_active_check: bool,
    pub fail_membership_insert: bool,
}

pub(crate) fn room(id: i64, block: &str, number: &str) -> Room {
    Room::new(
        RoomId::new(id).expect("valid room id"),
        Block::new(block).expect("valid block"),
        RoomNumber::new(number).expect("valid room number"),
        Utc::now(),
    )
}

impl StubFacility {
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            ..Self::default()
        }
    }

    fn next_room_id(&self) -> RoomId {
        let next = self.rooms.iter().map(|room| room.id().get()).max().unwrap_or(0) + 1;
        RoomId::new(i64::from(next)).expect("positive id")
    }
}

#[async_trait]
impl FacilityTransaction for StubFacility {
    async fn find_room_by_id(
        &mut self,
        room_id: RoomId,
    ) -> Result<Option<Room>, FacilityStoreError> {
        Ok(self.rooms.iter().find(|room| room.id() == room_id).cloned())
    }

    async fn find_room_by_location(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError> {
        Ok(self
            .rooms
            .iter()
            .find(|room| room.block() == block && room.room_number() == room_number)
            .cloned())
    }

    async fn insert_room_if_absent(
        &mut self,
        block: &Block,
        room_number: &RoomNumber,
    ) -> Result<Option<Room>, FacilityStoreError> {
        if std::mem::take(&mut self.lose_room_insert_invisibly) {
            return Ok(None);
        }
        if let Some(winner) = self.lose_room_insert_to.take() {
            self.rooms.push(winner);
            return Ok(None);
        }
        let created = Room::new(
            self.next_room_id(),
            block.clone(),
            room_number.clone(),
            Utc::now(),
        );
        self.rooms.push(created.clone());
        Ok(Some(created))
    }

    async fn membership_exists(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<bool, FacilityStoreError> {
        Ok(self.members.iter().any(|(room_id, block, member)| {
            *room_id == room.id() && block == room.block() && member == user_id
        }))
    }

    async fn insert_membership(
        &mut self,
        room: &Room,
        user_id: &UserId,
    ) -> Result<(), FacilityStoreError> {
        if self.fail_membership_insert {
            return Err(FacilityStoreError::query("membership insert failed"));
        }
        self.members.push((room.id(), room.block().clone(), *user_id));
        Ok(())
    }

    async fn active_request_exists(
        &mut self,
        room_id: RoomId,
        request_type: RequestType,
    ) -> Result<bool, FacilityStoreError> {
        if self.miss_active_check {
            return Ok(false);
        }
        Ok(self.requests.iter().any(|request| {
            request.room_id() == room_id
                && request.request_type() == request_type
                && request.status() == RequestStatus::Active
        }))
    }

    async fn insert_request(
        &mut self,
        insert: &RequestInsert,
    ) -> Result<ServiceRequest, FacilityStoreError> {
        let clash = self.requests.iter().any(|request| {
            request.room_id() == insert.room_id
                && request.request_type() == insert.request_type
                && request.status() == RequestStatus::Active
        });
        if clash {
            return Err(FacilityStoreError::active_request_conflict());
        }
        let now = Utc::now();
        let id = i32::try_from(self.requests.len() + 1).expect("small test data");
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
        self.requests.push(request.clone());
        Ok(request)
    }

    async fn insert_user(&mut self, insert: &UserInsert) -> Result<User, FacilityStoreError> {
        if self.users.iter().any(|user| user.email() == &insert.email) {
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
        self.users.push(user.clone());
        Ok(user)
    }
}
