//! Room model.
//!
//! Rooms are the assignable units of the rack grid. Each room carries a
//! housekeeping status; `Maintenance` and `OutOfOrder` make a room *blocked*,
//! meaning it can never be the target of a move or relocation.

use serde::{Deserialize, Serialize};

/// A physical room on the rack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable room number (e.g. "101", "A-12").
    pub number: String,
    /// Room type code (e.g. "STD", "DLX", "SUITE").
    pub room_type: String,
    /// Floor the room is on.
    pub floor: i32,
    /// Housekeeping status.
    pub status: RoomStatus,
}

/// Housekeeping status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Cleaned, awaiting inspection.
    Clean,
    /// Cleaned and inspected, ready for sale.
    Inspected,
    /// Needs housekeeping.
    Dirty,
    /// Under maintenance: blocked.
    Maintenance,
    /// Out of order: blocked.
    OutOfOrder,
}

impl RoomStatus {
    /// Whether this status makes the room ineligible as a move target.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        matches!(self, RoomStatus::Maintenance | RoomStatus::OutOfOrder)
    }
}

impl Room {
    /// Creates a clean room.
    pub fn new(id: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            room_type: String::new(),
            floor: 0,
            status: RoomStatus::Clean,
        }
    }

    /// Sets the room type code.
    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = room_type.into();
        self
    }

    /// Sets the floor.
    pub fn with_floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    /// Sets the housekeeping status.
    pub fn with_status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the room can never be a move target.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.status.is_blocked()
    }

    /// Numeric portion of the room number, if any.
    ///
    /// Used for room-number proximity scoring; "A-12" parses as 12,
    /// "Penthouse" as `None`.
    pub fn numeric_number(&self) -> Option<i64> {
        let digits: String = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}
