//! Move orchestration.
//!
//! Entry point for a single drag-and-drop move request. Validation runs the
//! conflict detector and classifier over an explicit snapshot, then either
//! clears the move, rejects it (blocked room), or hands the caller a
//! conflict set with the legal resolution options: an exact swap when one is
//! possible, and always a scored relocation plan as a suggestion.
//!
//! `MoveRequest` models the request lifecycle:
//!
//! ```text
//! Idle → (validate) → AwaitingResolution → (apply | cancel) → Applied | Rejected
//! ```
//!
//! Each request is its own machine over its own snapshot; nothing is shared
//! between requests, so the engine can be driven by any input mechanism —
//! pointer, keyboard, or a plain API call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conflict::{detect_conflicts, ConflictKind, ConflictSet};
use crate::executor::{execute_resolution, AppliedResolution, ExecuteError, Resolution};
use crate::models::{RackSnapshot, Reassignment, ResolutionPlan};
use crate::planner::plan_relocations;
use crate::store::RackStore;
use crate::swap::swap_reassignments;

/// Errors from move orchestration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The moving reservation is not in the snapshot.
    #[error("unknown reservation '{0}'")]
    UnknownReservation(String),
    /// The operation is not legal in the request's current state.
    #[error("move request is not in a state that allows this operation")]
    InvalidState,
    /// The chosen resolution is not offered for this validation.
    #[error("requested resolution is not available for this conflict")]
    UnavailableResolution,
    /// Execution failed; see the inner error for committed-step details.
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Outcome of validating a move request against a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MoveValidation {
    /// No conflicts: the move is a single direct reassignment.
    Clear {
        /// The one reassignment to apply.
        reassignment: Reassignment,
    },
    /// Target room is blocked (or unknown): pick another room.
    Blocked {
        /// The rejected target.
        room_id: String,
    },
    /// The move displaces other reservations.
    Conflict {
        /// Who is displaced, and how urgent it is.
        set: ConflictSet,
        /// The exact-swap option, when one is legal.
        swap: Option<[Reassignment; 2]>,
        /// Suggested scored relocation plan (may be infeasible).
        plan: ResolutionPlan,
    },
}

/// How the caller wants a conflicted (or clear) move applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionChoice {
    /// Apply the clear move directly.
    Direct,
    /// Apply the one-for-one swap.
    Swap,
    /// Relodge each conflict into the first free room, unscored.
    AutoRelodge,
    /// Apply the suggested (reviewed) relocation plan.
    Plan,
}

/// Why a move request ended in `Rejected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Target room was blocked at validation time.
    BlockedRoom {
        /// The blocked target.
        room_id: String,
    },
    /// A displaced guest could not be placed anywhere.
    Unplaceable {
        /// Guests with no free room.
        guests: Vec<String>,
    },
    /// The caller cancelled at the resolution prompt.
    Cancelled,
    /// Execution failed mid-sequence; earlier steps stay committed and
    /// need reconciliation.
    PartiallyApplied {
        /// Reassignments committed before the failure.
        committed: usize,
    },
}

/// Observable state of a move request.
#[derive(Debug, Clone)]
pub enum MoveState {
    /// Created, not yet validated.
    Idle,
    /// Validated with conflicts or a clear path; waiting on the caller.
    AwaitingResolution {
        /// The validation the caller is choosing against.
        validation: MoveValidation,
    },
    /// Terminal: every reassignment committed.
    Applied {
        /// What was committed.
        outcome: AppliedResolution,
    },
    /// Terminal: nothing further will be applied.
    Rejected {
        /// Why the request ended.
        reason: RejectReason,
    },
}

/// Validates a move request against a snapshot.
///
/// Pure: reads the snapshot, mutates nothing. The relocation plan excludes
/// the target room and the mover's current room from every displaced
/// reservation's candidate pool, so the plan cannot recreate the conflict it
/// resolves.
///
/// # Examples
///
/// ```
/// use u_rack::models::{RackSnapshot, Reservation, Room, StayRange};
/// use u_rack::orchestrator::{validate_move, MoveValidation};
///
/// let stay = StayRange::new(
///     "2024-06-01".parse().unwrap(),
///     "2024-06-03".parse().unwrap(),
/// );
/// let snapshot = RackSnapshot::new(
///     vec![Room::new("r101", "101"), Room::new("r102", "102")],
///     vec![Reservation::new("b1", "Alice", stay).with_room("r102")],
/// );
///
/// let validation = validate_move(&snapshot, "b1", "r101", "2024-05-01".parse().unwrap());
/// assert!(matches!(validation, Ok(MoveValidation::Clear { .. })));
/// ```
pub fn validate_move(
    snapshot: &RackSnapshot,
    reservation_id: &str,
    target_room_id: &str,
    today: NaiveDate,
) -> Result<MoveValidation, EngineError> {
    let moving = snapshot
        .reservation(reservation_id)
        .ok_or_else(|| EngineError::UnknownReservation(reservation_id.to_string()))?;

    let set = detect_conflicts(snapshot, moving, target_room_id, today);
    match set.kind {
        ConflictKind::Blocked => Ok(MoveValidation::Blocked {
            room_id: target_room_id.to_string(),
        }),
        ConflictKind::None => Ok(MoveValidation::Clear {
            reassignment: Reassignment::new(reservation_id, target_room_id),
        }),
        ConflictKind::Current | ConflictKind::Future => {
            let swap = swap_reassignments(moving, &set.conflicts, target_room_id);
            let exclude = planner_exclusions(snapshot, reservation_id, target_room_id);
            let plan = ResolutionPlan::new(
                plan_relocations(snapshot, &set.conflicts, &exclude),
                reservation_id,
                target_room_id,
            );
            tracing::debug!(
                reservation = reservation_id,
                room = target_room_id,
                conflicts = set.conflicts.len(),
                kind = ?set.kind,
                swap_available = swap.is_some(),
                plan_feasible = plan.is_feasible(),
                "move needs resolution"
            );
            Ok(MoveValidation::Conflict { set, swap, plan })
        }
    }
}

/// Rooms displaced reservations must not be relodged into: the move's target
/// and the mover's own current room.
fn planner_exclusions(
    snapshot: &RackSnapshot,
    reservation_id: &str,
    target_room_id: &str,
) -> Vec<String> {
    let mut exclude = vec![target_room_id.to_string()];
    if let Some(room_id) = snapshot
        .reservation(reservation_id)
        .and_then(|r| r.room_id.clone())
    {
        if room_id != target_room_id {
            exclude.push(room_id);
        }
    }
    exclude
}

/// One drag-and-drop move request, from validation to a terminal state.
///
/// A fresh request starts a new machine; terminal states are never left.
#[derive(Debug, Clone)]
pub struct MoveRequest {
    /// The reservation being moved.
    pub reservation_id: String,
    /// The room it is being dropped onto.
    pub target_room_id: String,
    state: MoveState,
}

impl MoveRequest {
    /// Creates an idle move request.
    pub fn new(reservation_id: impl Into<String>, target_room_id: impl Into<String>) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            target_room_id: target_room_id.into(),
            state: MoveState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &MoveState {
        &self.state
    }

    /// Whether the request has reached `Applied` or `Rejected`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            MoveState::Applied { .. } | MoveState::Rejected { .. }
        )
    }

    /// Runs validation and advances out of `Idle`.
    ///
    /// A blocked target goes straight to `Rejected`; anything else waits in
    /// `AwaitingResolution` — including a clear move, which still needs the
    /// caller to apply it against a store.
    pub fn validate(
        &mut self,
        snapshot: &RackSnapshot,
        today: NaiveDate,
    ) -> Result<MoveValidation, EngineError> {
        if !matches!(self.state, MoveState::Idle) {
            return Err(EngineError::InvalidState);
        }

        let validation =
            validate_move(snapshot, &self.reservation_id, &self.target_room_id, today)?;
        self.state = match &validation {
            MoveValidation::Blocked { room_id } => MoveState::Rejected {
                reason: RejectReason::BlockedRoom {
                    room_id: room_id.clone(),
                },
            },
            _ => MoveState::AwaitingResolution {
                validation: validation.clone(),
            },
        };
        Ok(validation)
    }

    /// Applies the chosen resolution and reaches a terminal state.
    ///
    /// `Direct` is only legal for a clear validation; `Swap` only when the
    /// validation offered one; `AutoRelodge` and `Plan` only for conflicted
    /// validations. An unavailable choice leaves the request awaiting, so
    /// the caller can pick again.
    pub fn apply(
        &mut self,
        store: &mut impl RackStore,
        snapshot: &RackSnapshot,
        choice: ResolutionChoice,
    ) -> Result<AppliedResolution, EngineError> {
        let validation = match &self.state {
            MoveState::AwaitingResolution { validation } => validation.clone(),
            _ => return Err(EngineError::InvalidState),
        };

        let resolution = self.resolution_for(snapshot, &validation, choice)?;
        match execute_resolution(store, snapshot, &resolution) {
            Ok(outcome) => {
                self.state = MoveState::Applied { outcome };
                Ok(outcome)
            }
            Err(err) => {
                self.state = MoveState::Rejected {
                    reason: match &err {
                        ExecuteError::Unplaceable { guests } => RejectReason::Unplaceable {
                            guests: guests.clone(),
                        },
                        ExecuteError::StepFailed { committed, .. } => {
                            RejectReason::PartiallyApplied {
                                committed: *committed,
                            }
                        }
                    },
                };
                Err(err.into())
            }
        }
    }

    /// Cancels a request that is awaiting resolution.
    pub fn cancel(&mut self) -> Result<(), EngineError> {
        if !matches!(self.state, MoveState::AwaitingResolution { .. }) {
            return Err(EngineError::InvalidState);
        }
        self.state = MoveState::Rejected {
            reason: RejectReason::Cancelled,
        };
        Ok(())
    }

    fn resolution_for(
        &self,
        snapshot: &RackSnapshot,
        validation: &MoveValidation,
        choice: ResolutionChoice,
    ) -> Result<Resolution, EngineError> {
        match (validation, choice) {
            (MoveValidation::Clear { .. }, ResolutionChoice::Direct) => Ok(Resolution::Direct {
                reservation_id: self.reservation_id.clone(),
                target_room_id: self.target_room_id.clone(),
            }),
            (MoveValidation::Conflict { swap, .. }, ResolutionChoice::Swap) => swap
                .clone()
                .map(|steps| Resolution::Swap { steps })
                .ok_or(EngineError::UnavailableResolution),
            (MoveValidation::Conflict { set, .. }, ResolutionChoice::AutoRelodge) => {
                Ok(Resolution::AutoRelodge {
                    conflicts: set.conflicts.clone(),
                    moving_reservation_id: self.reservation_id.clone(),
                    target_room_id: self.target_room_id.clone(),
                    exclude_rooms: planner_exclusions(
                        snapshot,
                        &self.reservation_id,
                        &self.target_room_id,
                    ),
                })
            }
            (MoveValidation::Conflict { plan, .. }, ResolutionChoice::Plan) => {
                Ok(Resolution::Plan(plan.clone()))
            }
            _ => Err(EngineError::UnavailableResolution),
        }
    }
}
