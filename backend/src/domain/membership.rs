//! Membership registration inside a unit of work.

use super::ports::{FacilityStoreError, FacilityTransaction};
use super::{Room, UserId};

/// Ensure `user_id` is a member of `room`. Existing edges are left alone.
pub async fn ensure_member(
    tx: &mut dyn FacilityTransaction,
    room: &Room,
    user_id: &UserId,
) -> Result<(), FacilityStoreError> {
    if tx.membership_exists(room, user_id).await? {
        return Ok(());
    }
    tx.insert_membership(room, user_id).await
}
