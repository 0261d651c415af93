//! Store contract.
//!
//! The engine never owns rooms or reservations — it reads them from, and
//! writes reassignments back to, a `RackStore`. Any transport works (REST,
//! RPC, in-process); `InMemoryStore` is the reference implementation and the
//! one the tests use.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{Reservation, Room, StayRange};

/// Errors from the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The reservation id does not exist.
    #[error("unknown reservation '{0}'")]
    UnknownReservation(String),
    /// The room id does not exist.
    #[error("unknown room '{0}'")]
    UnknownRoom(String),
    /// The room was taken between snapshot and apply (lost race).
    #[error("room '{room_id}' is no longer free for reservation '{reservation_id}'")]
    RoomOccupied {
        /// The contested room.
        room_id: String,
        /// The reservation that could not be placed.
        reservation_id: String,
    },
}

impl StoreError {
    /// Whether retrying with a fresh snapshot could succeed.
    ///
    /// A lost race is retryable; unknown ids are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::RoomOccupied { .. })
    }
}

/// Persistence collaborator for rooms and reservations.
pub trait RackStore {
    /// All rooms.
    fn list_rooms(&self) -> Result<Vec<Room>, StoreError>;

    /// Reservations whose stay overlaps the horizon.
    fn list_reservations(&self, horizon: &StayRange) -> Result<Vec<Reservation>, StoreError>;

    /// Moves a reservation into a room. Fails loudly on invalid ids.
    ///
    /// Each call is a discrete, idempotent write; the engine applies
    /// multi-step resolutions as a sequence of these.
    fn reassign_reservation(
        &mut self,
        reservation_id: &str,
        room_id: &str,
    ) -> Result<Reservation, StoreError>;
}

/// In-memory `RackStore`.
///
/// Last-writer-wins: reassignment does not check availability, matching a
/// backend that defers uniqueness to a later audit. Tests that need lost-race
/// behavior wrap this in a failure-injecting store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    rooms: Vec<Room>,
    reservations: HashMap<String, Reservation>,
    order: Vec<String>,
}

impl InMemoryStore {
    /// Creates a store from rooms and reservations.
    pub fn new(rooms: Vec<Room>, reservations: Vec<Reservation>) -> Self {
        let order = reservations.iter().map(|r| r.id.clone()).collect();
        let reservations = reservations.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            rooms,
            reservations,
            order,
        }
    }

    /// Current state of a reservation.
    pub fn reservation(&self, reservation_id: &str) -> Option<&Reservation> {
        self.reservations.get(reservation_id)
    }
}

impl RackStore for InMemoryStore {
    fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
        Ok(self.rooms.clone())
    }

    fn list_reservations(&self, horizon: &StayRange) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.reservations.get(id))
            .filter(|r| r.stay.overlaps(horizon))
            .cloned()
            .collect())
    }

    fn reassign_reservation(
        &mut self,
        reservation_id: &str,
        room_id: &str,
    ) -> Result<Reservation, StoreError> {
        if !self.rooms.iter().any(|r| r.id == room_id) {
            return Err(StoreError::UnknownRoom(room_id.to_string()));
        }
        let reservation = self
            .reservations
            .get_mut(reservation_id)
            .ok_or_else(|| StoreError::UnknownReservation(reservation_id.to_string()))?;
        reservation.room_id = Some(room_id.to_string());
        Ok(reservation.clone())
    }
}
