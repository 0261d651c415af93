//! Rack snapshot: the room/reservation index.
//!
//! A `RackSnapshot` is a read-only copy of the rooms and reservations for a
//! planning horizon, taken once per move attempt. Every engine function takes
//! the snapshot as an explicit argument — there is no shared mutable state
//! between move requests, and a snapshot is never updated in place.
//!
//! The snapshot may be stale by the time a resolution is applied; the store
//! surfaces a lost race as a retryable error at apply time (see `executor`).

use serde::{Deserialize, Serialize};

use crate::store::{RackStore, StoreError};

use super::{Reservation, Room, StayRange};

/// Immutable rooms-and-reservations index for one planning pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RackSnapshot {
    rooms: Vec<Room>,
    reservations: Vec<Reservation>,
}

impl RackSnapshot {
    /// Creates a snapshot from in-memory data.
    pub fn new(rooms: Vec<Room>, reservations: Vec<Reservation>) -> Self {
        Self {
            rooms,
            reservations,
        }
    }

    /// Loads a snapshot from a store for the given horizon.
    pub fn from_store(store: &impl RackStore, horizon: &StayRange) -> Result<Self, StoreError> {
        Ok(Self {
            rooms: store.list_rooms()?,
            reservations: store.list_reservations(horizon)?,
        })
    }

    /// All rooms, in rack order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All reservations in the horizon.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Looks up a room by id.
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Looks up a reservation by id.
    pub fn reservation(&self, reservation_id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == reservation_id)
    }

    /// Active reservations occupying a room (cancelled/no-show excluded).
    pub fn occupants<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a Reservation> + 'a {
        self.reservations
            .iter()
            .filter(move |r| r.occupies(room_id))
    }

    /// Whether a room is free for the whole range.
    ///
    /// `exclude_reservation` removes one reservation from consideration,
    /// typically the one being moved (a reservation never conflicts with
    /// itself).
    pub fn is_room_free(
        &self,
        room_id: &str,
        range: &StayRange,
        exclude_reservation: Option<&str>,
    ) -> bool {
        !self.occupants(room_id).any(|r| {
            Some(r.id.as_str()) != exclude_reservation && r.stay.overlaps(range)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReservationStatus, RoomStatus};

    fn stay(start: &str, end: &str) -> StayRange {
        StayRange::new(start.parse().unwrap(), end.parse().unwrap())
    }

    fn sample() -> RackSnapshot {
        RackSnapshot::new(
            vec![
                Room::new("r101", "101").with_room_type("STD").with_floor(1),
                Room::new("r102", "102").with_room_type("STD").with_floor(1),
                Room::new("r201", "201")
                    .with_room_type("DLX")
                    .with_floor(2)
                    .with_status(RoomStatus::OutOfOrder),
            ],
            vec![
                Reservation::new("b1", "Alice", stay("2024-06-01", "2024-06-03")).with_room("r101"),
                Reservation::new("b2", "Bob", stay("2024-06-03", "2024-06-05")).with_room("r101"),
                Reservation::new("b3", "Carol", stay("2024-06-01", "2024-06-05"))
                    .with_room("r102")
                    .with_status(ReservationStatus::Cancelled),
            ],
        )
    }

    #[test]
    fn test_lookups() {
        let snap = sample();
        assert_eq!(snap.room("r101").unwrap().number, "101");
        assert!(snap.room("r999").is_none());
        assert_eq!(snap.reservation("b2").unwrap().guest_name, "Bob");
        assert!(snap.reservation("b999").is_none());
    }

    #[test]
    fn test_occupants_skip_cancelled() {
        let snap = sample();
        assert_eq!(snap.occupants("r101").count(), 2);
        // Carol is cancelled: room 102 has no occupants.
        assert_eq!(snap.occupants("r102").count(), 0);
    }

    #[test]
    fn test_is_room_free() {
        let snap = sample();
        // r101 holds Alice (01→03) and Bob (03→05).
        assert!(!snap.is_room_free("r101", &stay("2024-06-02", "2024-06-04"), None));
        assert!(snap.is_room_free("r101", &stay("2024-06-05", "2024-06-07"), None));
        // Cancelled Carol does not block r102.
        assert!(snap.is_room_free("r102", &stay("2024-06-01", "2024-06-05"), None));
    }

    #[test]
    fn test_is_room_free_excludes_given_reservation() {
        let snap = sample();
        // Alice's own dates in her own room, excluding herself: free.
        assert!(snap.is_room_free("r101", &stay("2024-06-01", "2024-06-03"), Some("b1")));
        // Not excluding her: occupied.
        assert!(!snap.is_room_free("r101", &stay("2024-06-01", "2024-06-03"), None));
    }
}
