//! One-for-one room swap resolution.
//!
//! A swap is legal only for an exact mirror: a single conflicting
//! reservation whose stay covers precisely the same nights as the mover's.
//! The conflicting reservation takes the room the mover vacates, and the
//! mover takes the target — two reassignments, conflict first.

use crate::models::{Reassignment, Reservation};

/// Whether an exact one-for-one swap can resolve the conflict set.
///
/// True only when there is exactly one conflict and its arrival and
/// departure dates equal the mover's. Any other conflict count or any date
/// mismatch makes a swap illegal.
pub fn can_swap(moving: &Reservation, conflicts: &[Reservation]) -> bool {
    moving.room_id.is_some()
        && conflicts.len() == 1
        && conflicts[0].stay == moving.stay
}

/// Builds the two swap reassignments, or `None` when no swap is legal.
///
/// Order is fixed: the conflicting reservation moves into the mover's prior
/// room first, then the mover moves into the target. A store that enforces
/// uniqueness eagerly sees at most one transient double-assignment this way.
pub fn swap_reassignments(
    moving: &Reservation,
    conflicts: &[Reservation],
    target_room_id: &str,
) -> Option<[Reassignment; 2]> {
    if !can_swap(moving, conflicts) {
        return None;
    }
    let vacated = moving.room_id.as_deref()?;
    Some([
        Reassignment::new(&conflicts[0].id, vacated),
        Reassignment::new(&moving.id, target_room_id),
    ])
}
