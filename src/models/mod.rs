//! Rack domain models.
//!
//! Core data types for the room-move engine: rooms, reservations, the
//! per-move snapshot they are read from, and the ephemeral plan types a
//! conflicted move produces.
//!
//! Rooms and reservations are owned and mutated by the backing store; the
//! engine reads a `RackSnapshot` and emits `Reassignment` intents back.

mod dates;
mod plan;
mod reservation;
mod room;
mod snapshot;

pub use dates::StayRange;
pub use plan::{Reassignment, Relocation, ResolutionPlan};
pub use reservation::{Reservation, ReservationStatus};
pub use room::{Room, RoomStatus};
pub use snapshot::RackSnapshot;
