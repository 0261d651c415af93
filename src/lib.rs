//! Room-move engine for the rack grid.
//!
//! Backs the visual room/date grid of a property-management system: when a
//! reservation is dragged onto a room that is already booked for overlapping
//! nights, this crate decides whether the move is free, resolvable by an
//! exact one-for-one swap, resolvable by first-available relodging, or needs
//! a scored multi-reservation relocation plan — and applies the chosen
//! resolution as an ordered sequence of room reassignments.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Room`, `Reservation`, `StayRange`,
//!   `RackSnapshot`, `Relocation`, `ResolutionPlan`
//! - **`conflict`**: Overlap detection and CURRENT/FUTURE classification
//! - **`swap`**: Exact one-for-one swap resolution
//! - **`planner`**: Scored relocation planning and first-free-room search
//! - **`executor`**: Sequential application of resolutions against a store
//! - **`orchestrator`**: The per-move state machine and `validate_move` entry point
//! - **`store`**: The `RackStore` persistence contract + in-memory reference
//! - **`validation`**: Snapshot integrity checks (double-booking, id hygiene)
//!
//! # Architecture
//!
//! The engine is synchronous and stateless between calls: every decision is
//! a pure function over a `RackSnapshot` the caller passes in. Only the
//! executor writes, one reassignment at a time, and it reports exactly how
//! far it got when a step fails. Snapshots can go stale between validation
//! and apply; a lost race surfaces as a retryable store error rather than a
//! validation-time conflict.

pub mod conflict;
pub mod executor;
pub mod models;
pub mod orchestrator;
pub mod planner;
pub mod store;
pub mod swap;
pub mod validation;
