//! Stay date ranges.
//!
//! All occupancy math runs on half-open calendar-day intervals `[start, end)`:
//! the arrival night is occupied, the departure day is not. Two stays that
//! share a turnover day (one ends the day the other starts) do not overlap.
//!
//! # Time Model
//! Dates are plain calendar days (`chrono::NaiveDate`), never timestamps.
//! Timezone handling is the caller's problem; by the time data reaches this
//! crate a day is a day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stay interval `[start, end)` in calendar days.
///
/// Half-open: includes the start date, excludes the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRange {
    /// Arrival date (inclusive).
    pub start: NaiveDate,
    /// Departure date (exclusive).
    pub end: NaiveDate,
}

impl StayRange {
    /// Creates a new stay range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of nights (end - start in days).
    #[inline]
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether the range is well-formed (`start < end`, at least one night).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Whether a date falls within this range.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day < self.end
    }

    /// Whether two stay ranges overlap.
    ///
    /// `a.start < b.end && b.start < a.end` — touching ranges (one stay's
    /// departure equals the other's arrival) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> StayRange {
        StayRange::new(d(start), d(end))
    }

    #[test]
    fn test_overlap_basic() {
        let a = range("2024-06-01", "2024-06-05");
        let b = range("2024-06-03", "2024-06-07");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        // A departs the day B arrives: same turnover day, no conflict.
        let a = range("2024-06-01", "2024-06-03");
        let b = range("2024-06-03", "2024-06-05");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let a = range("2024-06-01", "2024-06-03");
        let b = range("2024-06-10", "2024-06-12");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_range_overlaps() {
        let outer = range("2024-06-01", "2024-06-10");
        let inner = range("2024-06-04", "2024-06-05");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_identical_ranges_overlap() {
        let a = range("2024-06-01", "2024-06-03");
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_contains() {
        let a = range("2024-06-01", "2024-06-03");
        assert!(a.contains(d("2024-06-01")));
        assert!(a.contains(d("2024-06-02")));
        assert!(!a.contains(d("2024-06-03"))); // departure day is free
        assert!(!a.contains(d("2024-05-31")));
    }

    #[test]
    fn test_nights_and_validity() {
        assert_eq!(range("2024-06-01", "2024-06-03").nights(), 2);
        assert!(range("2024-06-01", "2024-06-02").is_valid());
        assert!(!range("2024-06-02", "2024-06-02").is_valid());
        assert!(!range("2024-06-03", "2024-06-01").is_valid());
    }

    #[test]
    fn test_serde_round_trip() {
        let a = range("2024-06-01", "2024-06-03");
        let json = serde_json::to_string(&a).unwrap();
        let back: StayRange = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
