//! Snapshot integrity validation.
//!
//! Checks structural integrity of a rack snapshot before planning. Detects:
//! - Duplicate room and reservation IDs
//! - Reservations assigned to rooms that don't exist
//! - Inverted or empty stay ranges
//! - Double-booked rooms (two active reservations overlapping in one room)
//!
//! The double-booking check verifies the core rack invariant: for a given
//! room and date, at most one active reservation occupies it. A snapshot
//! that fails it came from an already-inconsistent store, and planning on
//! top of it will only compound the damage.

use std::collections::HashSet;

use crate::models::RackSnapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A reservation is assigned to a room that doesn't exist.
    UnknownRoomReference,
    /// A stay range with `start >= end`.
    InvalidStayRange,
    /// Two active reservations overlap in the same room.
    DoubleBooked,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a rack snapshot.
///
/// Checks:
/// 1. No duplicate room IDs
/// 2. No duplicate reservation IDs
/// 3. Every assigned reservation references an existing room
/// 4. Every stay range has at least one night
/// 5. No room holds two overlapping active reservations
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &RackSnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for room in snapshot.rooms() {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
    }

    let mut reservation_ids = HashSet::new();
    for res in snapshot.reservations() {
        if !reservation_ids.insert(res.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate reservation ID: {}", res.id),
            ));
        }

        if !res.stay.is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidStayRange,
                format!(
                    "Reservation '{}' has invalid stay {} → {}",
                    res.id, res.stay.start, res.stay.end
                ),
            ));
        }

        if let Some(room_id) = &res.room_id {
            if !room_ids.contains(room_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRoomReference,
                    format!(
                        "Reservation '{}' references unknown room '{room_id}'",
                        res.id
                    ),
                ));
            }
        }
    }

    // Pairwise overlap per room among active reservations.
    for room in snapshot.rooms() {
        let occupants: Vec<_> = snapshot.occupants(&room.id).collect();
        for (i, a) in occupants.iter().enumerate() {
            for b in &occupants[i + 1..] {
                if a.stay.overlaps(&b.stay) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DoubleBooked,
                        format!(
                            "Room '{}' double-booked: '{}' and '{}' overlap",
                            room.id, a.id, b.id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
