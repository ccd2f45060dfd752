// ABOUTME: Interval conflict engine shared by all booking paths
// ABOUTME: Half-open time range overlap and availability coverage primitives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems

//! # Interval Conflict Engine
//!
//! Every booking path in the system (trainer availability windows, PT session
//! scheduling, room reassignment, group class placement) reduces to the same
//! question: does a candidate half-open time range `[start, end)` overlap any
//! committed range on the same resource and anchor key (calendar date or
//! day-of-week)? This module holds that single overlap law plus the coverage
//! check used for trainer availability. Callers are responsible for only
//! comparing ranges that share a resource and anchor key; ranges on different
//! resources or different dates/days never conflict.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// A half-open time range `[start, end)` within a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start
    pub start: NaiveTime,
    /// Exclusive end
    pub end: NaiveTime,
}

impl TimeRange {
    /// Build a range, enforcing the `start < end` invariant
    ///
    /// # Errors
    ///
    /// Returns a validation error if `start >= end`. This runs before any
    /// persistence so a degenerate or inverted range never reaches the store.
    pub fn new(start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::invalid_input(
                "Start time must be before end time",
            ));
        }
        Ok(Self { start, end })
    }

    /// Half-open interval overlap: true iff the two ranges share an instant
    ///
    /// `a.start < b.end && b.start < a.end`. Back-to-back ranges, where one
    /// ends exactly when the other begins, do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this range fully contains `candidate`
    ///
    /// Used for availability coverage: a session fits a window only when one
    /// single window contains it end to end. Partial coverage across two
    /// adjacent windows does not count.
    #[must_use]
    pub fn contains(&self, candidate: &Self) -> bool {
        self.start <= candidate.start && candidate.end <= self.end
    }
}

/// Find the first committed range overlapping `candidate`, if any
///
/// The caller loads the committed set for one resource and one anchor key;
/// this only applies the overlap law.
pub fn first_overlap<'a, T>(
    candidate: &TimeRange,
    existing: impl IntoIterator<Item = (&'a T, TimeRange)>,
) -> Option<&'a T> {
    existing
        .into_iter()
        .find(|(_, range)| candidate.overlaps(range))
        .map(|(item, _)| item)
}

/// Whether any availability window fully contains `candidate`
pub fn covered_by_any(candidate: &TimeRange, windows: impl IntoIterator<Item = TimeRange>) -> bool {
    windows.into_iter().any(|w| w.contains(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn range(sh: u32, sm: u32, eh: u32, em: u32) -> TimeRange {
        TimeRange::new(t(sh, sm), t(eh, em)).unwrap()
    }

    #[test]
    fn test_rejects_inverted_and_empty_ranges() {
        assert!(TimeRange::new(t(10, 0), t(9, 0)).is_err());
        assert!(TimeRange::new(t(9, 0), t(9, 0)).is_err());
        assert!(TimeRange::new(t(9, 0), t(9, 1)).is_ok());
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = range(9, 0, 10, 0);
        let b = range(9, 30, 10, 30);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = range(11, 0, 12, 0);
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_range_overlaps_itself() {
        let a = range(9, 0, 10, 0);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_adjacent_ranges_never_conflict() {
        let morning = range(9, 0, 10, 0);
        let next = range(10, 0, 11, 0);
        assert!(!morning.overlaps(&next));
        assert!(!next.overlaps(&morning));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = range(8, 0, 17, 0);
        let inner = range(9, 0, 10, 0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_requires_full_coverage() {
        let window = range(8, 0, 17, 0);
        assert!(window.contains(&range(9, 0, 10, 0)));
        assert!(window.contains(&range(8, 0, 17, 0)));
        assert!(!window.contains(&range(7, 0, 9, 0)));
        assert!(!window.contains(&range(16, 0, 18, 0)));
    }

    #[test]
    fn test_partial_coverage_across_adjacent_windows_is_not_enough() {
        // [8:00, 12:00) and [12:00, 16:00) together span the candidate, but
        // neither window contains it alone.
        let windows = [range(8, 0, 12, 0), range(12, 0, 16, 0)];
        let candidate = range(11, 0, 13, 0);
        assert!(!covered_by_any(&candidate, windows));
        assert!(covered_by_any(&range(9, 0, 11, 0), windows));
    }

    #[test]
    fn test_first_overlap_finds_conflicting_item() {
        let existing = [
            (1_i64, range(7, 0, 8, 0)),
            (2_i64, range(9, 30, 10, 30)),
            (3_i64, range(11, 0, 12, 0)),
        ];
        let found = first_overlap(
            &range(9, 0, 10, 0),
            existing.iter().map(|(id, r)| (id, *r)),
        );
        assert_eq!(found, Some(&2));

        let none = first_overlap(
            &range(8, 0, 9, 0),
            existing.iter().map(|(id, r)| (id, *r)),
        );
        assert_eq!(none, None);
    }
}
