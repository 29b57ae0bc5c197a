//! Room resolution inside a unit of work.
//!
//! A reference by id must name an existing room whose block agrees with any
//! block the caller supplied. A reference by location finds the room or
//! creates it lazily.

use tracing::debug;

use super::ports::{FacilityStoreError, FacilityTransaction};
use super::{Block, Room, RoomId, RoomNumber, RoomReference};

/// Reasons a room reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomResolutionError {
    /// No room has the given id.
    #[error("room {room_id} not found")]
    NotFound { room_id: RoomId },
    /// The supplied block disagrees with the stored one.
    #[error("room {room_id} belongs to block {stored}, not {supplied}")]
    Mismatch {
        room_id: RoomId,
        stored: Block,
        supplied: Block,
    },
    /// Another writer owns the pair but its row is not visible yet.
    #[error("room {room_number} in block {block} is being created concurrently")]
    Conflict { block: Block, room_number: RoomNumber },
    /// The store failed.
    #[error(transparent)]
    Store(#[from] FacilityStoreError),
}

/// Verify that `supplied`, when present, names the room's block.
pub(crate) fn check_block(room: &Room, supplied: Option<&Block>) -> Result<(), RoomResolutionError> {
    match supplied {
        Some(block) if !room.block().matches(block) => Err(RoomResolutionError::Mismatch {
            room_id: room.id(),
            stored: room.block().clone(),
            supplied: block.clone(),
        }),
        _ => Ok(()),
    }
}

/// Resolve `reference` to exactly one room, creating it when named by a
/// location that does not exist yet.
pub async fn resolve_room(
    tx: &mut dyn FacilityTransaction,
    reference: &RoomReference,
) -> Result<Room, RoomResolutionError> {
    match reference {
        RoomReference::Id { room_id, block } => {
            let room = tx
                .find_room_by_id(*room_id)
                .await?
                .ok_or(RoomResolutionError::NotFound { room_id: *room_id })?;
            check_block(&room, block.as_ref())?;
            Ok(room)
        }
        RoomReference::Location { room_number, block } => {
            resolve_location(tx, block, room_number).await
        }
    }
}

/// Find the room at `(block, room_number)` or create it.
///
/// The insert yields to a concurrent writer; the pair is then read again so
/// both callers converge on the same row.
pub async fn resolve_location(
    tx: &mut dyn FacilityTransaction,
    block: &Block,
    room_number: &RoomNumber,
) -> Result<Room, RoomResolutionError> {
    if let Some(room) = tx.find_room_by_location(block, room_number).await? {
        return Ok(room);
    }

    if let Some(room) = tx.insert_room_if_absent(block, room_number).await? {
        debug!(room_id = %room.id(), %block, %room_number, "created room");
        return Ok(room);
    }

    debug!(%block, %room_number, "room insert yielded to a concurrent writer");
    tx.find_room_by_location(block, room_number)
        .await?
        .ok_or_else(|| RoomResolutionError::Conflict {
            block: block.clone(),
            room_number: room_number.clone(),
        })
}
