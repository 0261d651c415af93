//! Relocation planning.
//!
//! # Algorithm
//!
//! For each displaced reservation, in conflict order, scan every non-blocked
//! room outside the exclusion set, keep the rooms free for that reservation's
//! exact stay, score the free ones, and take the best. A chosen room leaves
//! the pool for the rest of the pass, so no two relocations in one plan can
//! target the same room.
//!
//! This is a greedy, single-pass assignment, not a globally optimal matching:
//! an early pick can starve a later conflict into a null target even when a
//! different pairing would have placed everyone. Accepted approximation —
//! the rack rarely has more than a handful of simultaneous conflicts.
//!
//! # Scoring
//!
//! Room-type match dominates, then floor distance from the reservation's
//! original room, then room-number proximity. Every free candidate scores
//! strictly positive, so a feasible relocation always carries a positive fit.

use std::collections::HashSet;

use crate::models::{RackSnapshot, Relocation, Reservation, Room};

/// Score weight for an exact room-type match.
const TYPE_MATCH_WEIGHT: f64 = 100.0;
/// Score weight for floor proximity (decays with floor distance).
const FLOOR_WEIGHT: f64 = 10.0;
/// Score weight for room-number proximity (decays with number distance).
const NUMBER_WEIGHT: f64 = 1.0;

/// Scores how well `candidate` fits a reservation whose original room was
/// `origin` (if it had one).
///
/// With no origin room (unassigned mover), only the type-match term applies.
fn fit_score(candidate: &Room, origin: Option<&Room>) -> f64 {
    let mut score = 0.0;

    if let Some(origin) = origin {
        if !origin.room_type.is_empty() && candidate.room_type == origin.room_type {
            score += TYPE_MATCH_WEIGHT;
        }

        let floor_dist = (candidate.floor - origin.floor).abs() as f64;
        score += FLOOR_WEIGHT / (1.0 + floor_dist);

        if let (Some(a), Some(b)) = (candidate.numeric_number(), origin.numeric_number()) {
            score += NUMBER_WEIGHT / (1.0 + (a - b).abs() as f64);
        }
    }

    // Baseline: any free room scores positive.
    score + 1.0
}

/// Finds the best free alternate room for each displaced reservation.
///
/// `exclude_rooms` is the caller's hard exclusion set — typically the move's
/// target room and the mover's own current room, so the plan cannot recreate
/// the conflict it is solving. Blocked rooms and rooms already chosen earlier
/// in this pass are excluded as well.
///
/// Every conflict gets exactly one `Relocation` in the output, in input
/// order; a conflict with no free candidate gets a null target.
pub fn plan_relocations(
    snapshot: &RackSnapshot,
    conflicts: &[Reservation],
    exclude_rooms: &[String],
) -> Vec<Relocation> {
    let mut taken: HashSet<&str> = exclude_rooms.iter().map(String::as_str).collect();
    let mut relocations = Vec::with_capacity(conflicts.len());

    for conflict in conflicts {
        let origin = conflict.room_id.as_deref().and_then(|id| snapshot.room(id));

        let best = snapshot
            .rooms()
            .iter()
            .filter(|room| !room.is_blocked() && !taken.contains(room.id.as_str()))
            .filter(|room| snapshot.is_room_free(&room.id, &conflict.stay, Some(&conflict.id)))
            .map(|room| (room, fit_score(room, origin)))
            .fold(None::<(&Room, f64)>, |best, (room, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((room, score)),
            });

        match best {
            Some((room, score)) => {
                taken.insert(&room.id);
                relocations.push(Relocation::to_room(
                    &conflict.id,
                    &conflict.guest_name,
                    &room.id,
                    score,
                ));
            }
            None => relocations.push(Relocation::unplaced(&conflict.id, &conflict.guest_name)),
        }
    }

    relocations
}

/// Returns the first non-blocked, non-excluded room free for the
/// reservation's full stay, in rack order. No scoring.
///
/// Backs the "auto-relodge" path, where the caller wants any resolution
/// without reviewing a scored plan.
pub fn find_first_free_room<'a>(
    snapshot: &'a RackSnapshot,
    reservation: &Reservation,
    exclude_rooms: &[String],
) -> Option<&'a Room> {
    snapshot.rooms().iter().find(|room| {
        !room.is_blocked()
            && !exclude_rooms.iter().any(|id| *id == room.id)
            && snapshot.is_room_free(&room.id, &reservation.stay, Some(&reservation.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoomStatus, StayRange};

    fn stay(start: &str, end: &str) -> StayRange {
        StayRange::new(start.parse().unwrap(), end.parse().unwrap())
    }

    fn guest(id: &str, name: &str, room: &str, start: &str, end: &str) -> Reservation {
        Reservation::new(id, name, stay(start, end)).with_room(room)
    }

    #[test]
    fn test_prefers_matching_room_type() {
        let snap = RackSnapshot::new(
            vec![
                Room::new("r201", "201").with_room_type("DLX").with_floor(2),
                Room::new("r105", "105").with_room_type("STD").with_floor(1),
                Room::new("r205", "205").with_room_type("DLX").with_floor(2),
            ],
            vec![guest("b1", "Carol", "r201", "2024-06-10", "2024-06-12")],
        );
        let conflicts = vec![snap.reservation("b1").unwrap().clone()];

        let plan = plan_relocations(&snap, &conflicts, &["r201".to_string()]);
        assert_eq!(plan.len(), 1);
        // r205 matches Carol's DLX type; r105 is closer by nothing that
        // outweighs the type mismatch.
        assert_eq!(plan[0].target_room_id.as_deref(), Some("r205"));
        assert!(plan[0].score > TYPE_MATCH_WEIGHT);
    }

    #[test]
    fn test_floor_and_number_proximity_break_type_ties() {
        let snap = RackSnapshot::new(
            vec![
                Room::new("r101", "101").with_room_type("STD").with_floor(1),
                Room::new("r501", "501").with_room_type("STD").with_floor(5),
                Room::new("r102", "102").with_room_type("STD").with_floor(1),
            ],
            vec![guest("b1", "Carol", "r101", "2024-06-10", "2024-06-12")],
        );
        let conflicts = vec![snap.reservation("b1").unwrap().clone()];

        let plan = plan_relocations(&snap, &conflicts, &["r101".to_string()]);
        // Same floor, adjacent number beats five floors up.
        assert_eq!(plan[0].target_room_id.as_deref(), Some("r102"));
    }

    #[test]
    fn test_occupied_blocked_and_excluded_rooms_are_skipped() {
        let snap = RackSnapshot::new(
            vec![
                Room::new("r101", "101"),
                Room::new("r102", "102").with_status(RoomStatus::OutOfOrder),
                Room::new("r103", "103"),
                Room::new("r104", "104"),
            ],
            vec![
                guest("b1", "Carol", "r101", "2024-06-10", "2024-06-12"),
                guest("b2", "Dave", "r103", "2024-06-11", "2024-06-13"),
            ],
        );
        let conflicts = vec![snap.reservation("b1").unwrap().clone()];

        // r101 excluded, r102 blocked, r103 occupied by Dave → r104.
        let plan = plan_relocations(&snap, &conflicts, &["r101".to_string()]);
        assert_eq!(plan[0].target_room_id.as_deref(), Some("r104"));
    }

    #[test]
    fn test_no_free_room_records_null_target() {
        let snap = RackSnapshot::new(
            vec![
                Room::new("r101", "101"),
                Room::new("r102", "102").with_status(RoomStatus::Maintenance),
            ],
            vec![guest("b1", "Carol", "r101", "2024-06-10", "2024-06-12")],
        );
        let conflicts = vec![snap.reservation("b1").unwrap().clone()];

        let plan = plan_relocations(&snap, &conflicts, &["r101".to_string()]);
        assert_eq!(plan.len(), 1);
        assert!(!plan[0].is_feasible());
        assert_eq!(plan[0].guest_name, "Carol");
    }

    #[test]
    fn test_two_relocations_never_share_a_room() {
        let snap = RackSnapshot::new(
            vec![
                Room::new("r101", "101"),
                Room::new("r102", "102"),
                Room::new("r103", "103"),
            ],
            vec![
                guest("b1", "Carol", "r101", "2024-06-10", "2024-06-12"),
                guest("b2", "Dave", "r101", "2024-06-10", "2024-06-12"),
            ],
        );
        let conflicts: Vec<_> = snap.reservations().to_vec();

        let plan = plan_relocations(&snap, &conflicts, &["r101".to_string()]);
        let targets: Vec<_> = plan.iter().filter_map(|r| r.target_room_id.clone()).collect();
        assert_eq!(targets.len(), 2);
        assert_ne!(targets[0], targets[1]);
    }

    #[test]
    fn test_greedy_ordering_can_starve_a_later_conflict() {
        // One free room, two displaced guests with overlapping stays: the
        // first conflict takes it, the second goes unplaced. Greedy by
        // construction; a different ordering would starve the other guest.
        let snap = RackSnapshot::new(
            vec![Room::new("r101", "101"), Room::new("r102", "102")],
            vec![
                guest("b1", "Carol", "r101", "2024-06-10", "2024-06-12"),
                guest("b2", "Dave", "r101", "2024-06-10", "2024-06-12"),
            ],
        );
        let conflicts: Vec<_> = snap.reservations().to_vec();

        let plan = plan_relocations(&snap, &conflicts, &["r101".to_string()]);
        assert_eq!(plan[0].target_room_id.as_deref(), Some("r102"));
        assert!(!plan[1].is_feasible());
    }

    #[test]
    fn test_find_first_free_room_in_rack_order() {
        let snap = RackSnapshot::new(
            vec![
                Room::new("r101", "101").with_status(RoomStatus::Maintenance),
                Room::new("r102", "102"),
                Room::new("r103", "103"),
            ],
            vec![guest("b1", "Carol", "r102", "2024-06-10", "2024-06-12")],
        );
        let displaced = Reservation::new("b9", "Eve", stay("2024-06-10", "2024-06-12"));

        // r101 blocked, r102 occupied → r103.
        let room = find_first_free_room(&snap, &displaced, &[]).unwrap();
        assert_eq!(room.id, "r103");
    }

    #[test]
    fn test_find_first_free_room_respects_exclusions() {
        let snap = RackSnapshot::new(
            vec![Room::new("r101", "101"), Room::new("r102", "102")],
            vec![],
        );
        let displaced = Reservation::new("b9", "Eve", stay("2024-06-10", "2024-06-12"));

        let room = find_first_free_room(&snap, &displaced, &["r101".to_string()]).unwrap();
        assert_eq!(room.id, "r102");
        assert!(
            find_first_free_room(&snap, &displaced, &["r101".into(), "r102".into()]).is_none()
        );
    }

    #[test]
    fn test_find_first_free_room_none_when_everything_overlaps() {
        let snap = RackSnapshot::new(
            vec![Room::new("r101", "101"), Room::new("r102", "102")],
            vec![
                guest("b1", "Carol", "r101", "2024-06-09", "2024-06-13"),
                guest("b2", "Dave", "r102", "2024-06-11", "2024-06-12"),
            ],
        );
        let displaced = Reservation::new("b9", "Eve", stay("2024-06-10", "2024-06-12"));
        assert!(find_first_free_room(&snap, &displaced, &[]).is_none());
    }
}
