//! Resolution plan models.
//!
//! A move that displaces other reservations is resolved by a plan: one
//! `Relocation` per displaced reservation, plus the original move. Plans are
//! ephemeral — built per move attempt, applied or discarded, never stored.

use serde::{Deserialize, Serialize};

/// A single room reassignment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reassignment {
    /// Reservation to move.
    pub reservation_id: String,
    /// Room it moves into.
    pub to_room_id: String,
}

impl Reassignment {
    /// Creates a reassignment.
    pub fn new(reservation_id: impl Into<String>, to_room_id: impl Into<String>) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            to_room_id: to_room_id.into(),
        }
    }
}

/// A proposed new room for one displaced reservation.
///
/// `target_room_id = None` means no free room was found: the relocation is
/// infeasible and the plan as a whole cannot be applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relocation {
    /// The displaced reservation.
    pub reservation_id: String,
    /// Guest name, carried for error reporting and UI display.
    pub guest_name: String,
    /// Best free room found, or `None` if every candidate was taken.
    pub target_room_id: Option<String>,
    /// Fit score of the chosen room (0.0 when infeasible).
    pub score: f64,
}

impl Relocation {
    /// Creates a feasible relocation.
    pub fn to_room(
        reservation_id: impl Into<String>,
        guest_name: impl Into<String>,
        target_room_id: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            guest_name: guest_name.into(),
            target_room_id: Some(target_room_id.into()),
            score,
        }
    }

    /// Creates an infeasible relocation (no free room found).
    pub fn unplaced(reservation_id: impl Into<String>, guest_name: impl Into<String>) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            guest_name: guest_name.into(),
            target_room_id: None,
            score: 0.0,
        }
    }

    /// Whether a target room was found.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.target_room_id.is_some()
    }
}

/// The full resolution for one conflicted move: relocations for every
/// displaced reservation, then the original move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionPlan {
    /// One relocation per displaced reservation, in conflict order.
    pub relocations: Vec<Relocation>,
    /// The reservation being moved.
    pub moving_reservation_id: String,
    /// The room it is being moved into.
    pub target_room_id: String,
}

impl ResolutionPlan {
    /// Creates a plan.
    pub fn new(
        relocations: Vec<Relocation>,
        moving_reservation_id: impl Into<String>,
        target_room_id: impl Into<String>,
    ) -> Self {
        Self {
            relocations,
            moving_reservation_id: moving_reservation_id.into(),
            target_room_id: target_room_id.into(),
        }
    }

    /// Whether every relocation found a room.
    pub fn is_feasible(&self) -> bool {
        self.relocations.iter().all(Relocation::is_feasible)
    }

    /// Guests whose relocations found no room.
    pub fn unplaced_guests(&self) -> Vec<String> {
        self.relocations
            .iter()
            .filter(|r| !r.is_feasible())
            .map(|r| r.guest_name.clone())
            .collect()
    }

    /// Ordered reassignments: displaced reservations first, the mover last.
    ///
    /// Returns `None` if any relocation is infeasible — an infeasible plan
    /// must never be partially applied.
    pub fn reassignments(&self) -> Option<Vec<Reassignment>> {
        let mut steps = Vec::with_capacity(self.relocations.len() + 1);
        for reloc in &self.relocations {
            let room = reloc.target_room_id.as_ref()?;
            steps.push(Reassignment::new(&reloc.reservation_id, room));
        }
        steps.push(Reassignment::new(
            &self.moving_reservation_id,
            &self.target_room_id,
        ));
        Some(steps)
    }
}
