//! Conflict detection and classification.
//!
//! When a reservation is dropped onto a room, the reservations already in
//! that room whose stays overlap the mover's stay form the conflict set.
//! The set carries a classification tag telling the caller how urgent the
//! situation is:
//!
//! - `None` — room is free, move directly.
//! - `Blocked` — room is in maintenance / out of order, move is rejected.
//! - `Current` — at least one conflicting stay has already started; the
//!   displaced guest is (or should be) in-house.
//! - `Future` — all conflicts are upcoming bookings.
//!
//! Classification is advisory: it drives confirmation and urgency in the
//! caller, never which resolutions are legal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{RackSnapshot, Reservation};

/// Classification of a conflict set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// No overlapping reservations: direct move allowed.
    None,
    /// Target room is blocked: move rejected regardless of occupancy.
    Blocked,
    /// At least one conflicting stay has started as of today.
    Current,
    /// All conflicts are with not-yet-arrived bookings.
    Future,
}

/// The reservations displaced by a move, plus their classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictSet {
    /// Classification tag.
    pub kind: ConflictKind,
    /// Overlapping reservations in the target room, in snapshot order.
    /// Empty when `kind` is `None` or `Blocked`.
    pub conflicts: Vec<Reservation>,
}

impl ConflictSet {
    /// Whether the move can be applied without displacing anyone.
    #[inline]
    pub fn is_clear(&self) -> bool {
        self.kind == ConflictKind::None
    }
}

/// Finds the reservations a move would displace.
///
/// Returns every active reservation assigned to `target_room_id` whose stay
/// overlaps the mover's stay, excluding the mover itself. If the target room
/// is blocked, short-circuits to `Blocked` without computing overlaps.
pub fn detect_conflicts(
    snapshot: &RackSnapshot,
    moving: &Reservation,
    target_room_id: &str,
    today: NaiveDate,
) -> ConflictSet {
    if snapshot
        .room(target_room_id)
        .is_none_or(|room| room.is_blocked())
    {
        return ConflictSet {
            kind: ConflictKind::Blocked,
            conflicts: Vec::new(),
        };
    }

    let conflicts: Vec<Reservation> = snapshot
        .occupants(target_room_id)
        .filter(|r| r.id != moving.id && r.stay.overlaps(&moving.stay))
        .cloned()
        .collect();

    ConflictSet {
        kind: classify(&conflicts, today),
        conflicts,
    }
}

/// Classifies an already-detected conflict list.
///
/// `Current` wins over `Future` as soon as any conflicting stay has started.
/// The caller decides what "today" means (spec'd as the move-initiation date);
/// the tag only affects how urgently the caller presents the resolution.
pub fn classify(conflicts: &[Reservation], today: NaiveDate) -> ConflictKind {
    if conflicts.is_empty() {
        ConflictKind::None
    } else if conflicts.iter().any(|r| r.has_started(today)) {
        ConflictKind::Current
    } else {
        ConflictKind::Future
    }
}
