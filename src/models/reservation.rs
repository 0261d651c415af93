//! Reservation model.
//!
//! A reservation is a guest's claim on one room for a half-open range of
//! nights. Cancelled and no-show reservations never occupy a room and are
//! invisible to conflict detection and free-room queries. Unassigned
//! reservations (`room_id = None`) are off the grid entirely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::StayRange;

/// A guest reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: String,
    /// Guest display name.
    pub guest_name: String,
    /// Booking lifecycle status.
    pub status: ReservationStatus,
    /// Assigned room, if any. `None` = not on the grid.
    pub room_id: Option<String>,
    /// Stay dates (arrival inclusive, departure exclusive).
    pub stay: StayRange,
}

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// An option: held but not yet confirmed.
    Tentative,
    /// Confirmed booking.
    Confirmed,
    /// Guest is in-house.
    Present,
    /// Cancelled: does not occupy a room.
    Cancelled,
    /// Guest never arrived: does not occupy a room.
    NoShow,
}

impl Reservation {
    /// Creates a confirmed, unassigned reservation.
    pub fn new(id: impl Into<String>, guest_name: impl Into<String>, stay: StayRange) -> Self {
        Self {
            id: id.into(),
            guest_name: guest_name.into(),
            status: ReservationStatus::Confirmed,
            room_id: None,
            stay,
        }
    }

    /// Sets the booking status.
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Assigns a room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Whether the reservation occupies its room (not cancelled / no-show).
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status,
            ReservationStatus::Cancelled | ReservationStatus::NoShow
        )
    }

    /// Whether the stay has already started as of `today`.
    #[inline]
    pub fn has_started(&self, today: NaiveDate) -> bool {
        self.stay.start <= today
    }

    /// Whether this reservation occupies the given room on the grid.
    pub fn occupies(&self, room_id: &str) -> bool {
        self.is_active() && self.room_id.as_deref() == Some(room_id)
    }
}
