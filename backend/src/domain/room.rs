//! Rooms, blocks, and the references callers use to name a room.
//!
//! A room is identified by its `(block, room_number)` pair and also carries a
//! surrogate numeric id. Callers may name a room either way; see
//! [`RoomReference`].

use std::fmt;

use chrono::{DateTime, Utc};

/// Validation errors for room primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomValidationError {
    /// Room ids are positive.
    #[error("room id must be positive, got {value}")]
    NonPositiveId {
        /// Rejected value.
        value: i64,
    },
    /// The block name is blank.
    #[error("block must not be empty")]
    EmptyBlock,
    /// The room number is blank.
    #[error("room number must not be empty")]
    EmptyRoomNumber,
    /// Neither an id nor a complete `(room_number, block)` pair was given.
    #[error("a room id, or both a room number and a block, are required")]
    MissingReference,
}

/// Surrogate room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(i32);

impl RoomId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, RoomValidationError> {
        i32::try_from(value)
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or(RoomValidationError::NonPositiveId { value })
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named subdivision of the facility that scopes room numbering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block(String);

impl Block {
    /// Trim and validate a block name.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RoomValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RoomValidationError::EmptyBlock);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Block name as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive comparison used for block consistency checks.
    ///
    /// # Examples
    /// ```
    /// use facilities_backend::domain::Block;
    ///
    /// let stored = Block::new("BlockA").expect("valid block");
    /// let supplied = Block::new("blocka").expect("valid block");
    /// assert!(stored.matches(&supplied));
    /// ```
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Room number within a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Trim and validate a room number.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RoomValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RoomValidationError::EmptyRoomNumber);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Room number as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    block: Block,
    room_number: RoomNumber,
    created_at: DateTime<Utc>,
}

impl Room {
    /// Assemble a room from stored parts.
    #[must_use]
    pub const fn new(
        id: RoomId,
        block: Block,
        room_number: RoomNumber,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            block,
            room_number,
            created_at,
        }
    }

    /// Surrogate identifier.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Owning block.
    #[must_use]
    pub const fn block(&self) -> &Block {
        &self.block
    }

    /// Number within the block.
    #[must_use]
    pub const fn room_number(&self) -> &RoomNumber {
        &self.room_number
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// How a caller names a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomReference {
    /// By surrogate id, optionally asserting the owning block.
    Id {
        room_id: RoomId,
        block: Option<Block>,
    },
    /// By location within a block.
    Location {
        room_number: RoomNumber,
        block: Block,
    },
}

impl RoomReference {
    /// Build a reference from loosely supplied parts.
    ///
    /// Blank strings count as absent. An id takes precedence; otherwise both
    /// the room number and the block are required.
    ///
    /// # Examples
    /// ```
    /// use facilities_backend::domain::{RoomReference, RoomValidationError};
    ///
    /// let reference = RoomReference::from_parts(None, Some(" 101 "), Some("BlockA"))
    ///     .expect("complete location");
    /// assert!(matches!(reference, RoomReference::Location { .. }));
    ///
    /// let missing = RoomReference::from_parts(None, Some("101"), Some("  "));
    /// assert_eq!(missing, Err(RoomValidationError::MissingReference));
    /// ```
    pub fn from_parts(
        room_id: Option<RoomId>,
        room_number: Option<&str>,
        block: Option<&str>,
    ) -> Result<Self, RoomValidationError> {
        let block = block.and_then(|value| Block::new(value).ok());
        if let Some(room_id) = room_id {
            return Ok(Self::Id { room_id, block });
        }
        let room_number = room_number.and_then(|value| RoomNumber::new(value).ok());
        match (room_number, block) {
            (Some(room_number), Some(block)) => Ok(Self::Location { room_number, block }),
            _ => Err(RoomValidationError::MissingReference),
        }
    }
}
