//! Resolution execution.
//!
//! Turns a chosen resolution into an ordered list of single-reservation
//! reassignments and applies them to the store one at a time. Later steps
//! depend on earlier ones vacating rooms, so application is strictly
//! sequential.
//!
//! There is no rollback: the executor stops at the first failing step and
//! reports how many reassignments were already committed. Callers either
//! reconcile by hand or wrap the sequence in a real transaction at the
//! persistence layer. A lost race (room taken since the snapshot) surfaces
//! as a retryable failure, distinct from validation-time conflicts.

use thiserror::Error;

use crate::models::{RackSnapshot, Reassignment, Reservation, ResolutionPlan};
use crate::planner::find_first_free_room;
use crate::store::{RackStore, StoreError};

/// A resolution intent chosen by the caller.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Conflict-free move: one reassignment.
    Direct {
        /// Reservation being moved.
        reservation_id: String,
        /// Room it moves into.
        target_room_id: String,
    },
    /// Exact one-for-one swap: two reassignments, conflict first.
    Swap {
        /// The fixed-order pair from `swap::swap_reassignments`.
        steps: [Reassignment; 2],
    },
    /// Relodge each conflict into the first free room, then apply the move.
    AutoRelodge {
        /// Displaced reservations, in conflict order.
        conflicts: Vec<Reservation>,
        /// Reservation being moved.
        moving_reservation_id: String,
        /// Room it moves into.
        target_room_id: String,
        /// Rooms no conflict may be relodged into.
        exclude_rooms: Vec<String>,
    },
    /// A reviewed, confirmed relocation plan.
    Plan(ResolutionPlan),
}

/// Outcome of a fully applied resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedResolution {
    /// Number of reassignments committed.
    pub applied: usize,
}

/// Errors from resolution execution.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// A conflict could not be placed; nothing was mutated.
    #[error("no free room for: {}", .guests.join(", "))]
    Unplaceable {
        /// Guests with no free room.
        guests: Vec<String>,
    },
    /// A reassignment failed mid-sequence; earlier steps stay committed.
    #[error("reassignment {failed_step} of {total} failed ({committed} committed)")]
    StepFailed {
        /// Zero-based index of the failing step.
        failed_step: usize,
        /// Steps committed before the failure.
        committed: usize,
        /// Total steps in the resolution.
        total: usize,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },
}

impl ExecuteError {
    /// Whether retrying with a fresh snapshot could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExecuteError::Unplaceable { .. } => false,
            ExecuteError::StepFailed { source, .. } => source.is_retryable(),
        }
    }
}

/// Expands a resolution into its ordered reassignment steps.
///
/// Pure: resolves auto-relodge rooms against the snapshot and validates plan
/// feasibility, but touches no store. Errors here guarantee nothing was
/// mutated.
pub fn resolution_steps(
    snapshot: &RackSnapshot,
    resolution: &Resolution,
) -> Result<Vec<Reassignment>, ExecuteError> {
    match resolution {
        Resolution::Direct {
            reservation_id,
            target_room_id,
        } => Ok(vec![Reassignment::new(reservation_id, target_room_id)]),

        Resolution::Swap { steps } => Ok(steps.to_vec()),

        Resolution::AutoRelodge {
            conflicts,
            moving_reservation_id,
            target_room_id,
            exclude_rooms,
        } => {
            // Resolve every room before the first write so an unplaceable
            // conflict aborts the whole operation cleanly. Chosen rooms are
            // excluded for subsequent conflicts.
            let mut exclude = exclude_rooms.clone();
            let mut steps = Vec::with_capacity(conflicts.len() + 1);
            let mut unplaced = Vec::new();

            for conflict in conflicts {
                match find_first_free_room(snapshot, conflict, &exclude) {
                    Some(room) => {
                        steps.push(Reassignment::new(&conflict.id, &room.id));
                        exclude.push(room.id.clone());
                    }
                    None => unplaced.push(conflict.guest_name.clone()),
                }
            }

            if !unplaced.is_empty() {
                return Err(ExecuteError::Unplaceable { guests: unplaced });
            }

            steps.push(Reassignment::new(moving_reservation_id, target_room_id));
            Ok(steps)
        }

        Resolution::Plan(plan) => plan.reassignments().ok_or_else(|| ExecuteError::Unplaceable {
            guests: plan.unplaced_guests(),
        }),
    }
}

/// Applies a resolution as a sequence of reassignments.
///
/// Stops at the first store failure and reports the failing step together
/// with how many steps were already committed.
pub fn execute_resolution(
    store: &mut impl RackStore,
    snapshot: &RackSnapshot,
    resolution: &Resolution,
) -> Result<AppliedResolution, ExecuteError> {
    let steps = resolution_steps(snapshot, resolution)?;
    let total = steps.len();

    for (index, step) in steps.iter().enumerate() {
        tracing::debug!(
            reservation = %step.reservation_id,
            room = %step.to_room_id,
            step = index + 1,
            total,
            "applying reassignment"
        );
        if let Err(source) = store.reassign_reservation(&step.reservation_id, &step.to_room_id) {
            tracing::warn!(
                reservation = %step.reservation_id,
                room = %step.to_room_id,
                committed = index,
                %source,
                "reassignment failed; sequence aborted without rollback"
            );
            return Err(ExecuteError::StepFailed {
                failed_step: index,
                committed: index,
                total,
                source,
            });
        }
    }

    Ok(AppliedResolution { applied: total })
}
