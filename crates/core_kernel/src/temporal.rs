//! Effective-window types for date-ranged configuration
//!
//! Commission rules and customer assignments are valid over a date range
//! whose end may be open. The open end is an explicit `Option` here, never
//! a sentinel date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to effective windows
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid window: from {from} must not be after to {to}")]
    InvalidWindow { from: NaiveDate, to: NaiveDate },
}

/// An inclusive date range with an optional open end
///
/// `to = None` means the window extends indefinitely past its start.
/// Both bounds are inclusive, matching how effective dates are entered
/// by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveWindow {
    /// Start of the window (inclusive)
    pub from: NaiveDate,
    /// End of the window (inclusive), None means open-ended
    pub to: Option<NaiveDate>,
}

impl EffectiveWindow {
    /// Creates a new window, validating the bounds
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Result<Self, TemporalError> {
        if let Some(to) = to {
            if from > to {
                return Err(TemporalError::InvalidWindow { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Creates an open-ended window starting at the given date
    pub fn open(from: NaiveDate) -> Self {
        Self { from, to: None }
    }

    /// Creates a bounded window
    pub fn bounded(from: NaiveDate, to: NaiveDate) -> Result<Self, TemporalError> {
        Self::new(from, Some(to))
    }

    /// Returns true if this window contains the given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && self.to.map_or(true, |to| date <= to)
    }

    /// Returns true if this window overlaps another
    ///
    /// An open-ended window is unbounded to the right of its start, so two
    /// open-ended windows always overlap and a bounded window overlaps an
    /// open-ended one whenever its end reaches the open window's start.
    pub fn overlaps(&self, other: &EffectiveWindow) -> bool {
        let self_reaches = self.to.map_or(true, |to| to >= other.from);
        let other_reaches = other.to.map_or(true, |to| to >= self.from);
        self_reaches && other_reaches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_window_containment() {
        let w = EffectiveWindow::bounded(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        assert!(w.contains(d(2024, 1, 1)));
        assert!(w.contains(d(2024, 12, 31)));
        assert!(!w.contains(d(2025, 1, 1)));

        let open = EffectiveWindow::open(d(2024, 6, 1));
        assert!(open.contains(d(2030, 1, 1)));
        assert!(!open.contains(d(2024, 5, 31)));
    }

    #[test]
    fn test_invalid_window_rejected() {
        assert!(EffectiveWindow::bounded(d(2024, 6, 1), d(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_bounded_overlap() {
        let a = EffectiveWindow::bounded(d(2024, 1, 1), d(2024, 6, 30)).unwrap();
        let b = EffectiveWindow::bounded(d(2024, 6, 1), d(2024, 12, 31)).unwrap();
        let c = EffectiveWindow::bounded(d(2024, 7, 1), d(2024, 12, 31)).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_open_ended_overlap() {
        let open = EffectiveWindow::open(d(2024, 7, 1));
        let before = EffectiveWindow::bounded(d(2024, 1, 1), d(2024, 6, 30)).unwrap();
        let touching = EffectiveWindow::bounded(d(2024, 1, 1), d(2024, 7, 1)).unwrap();

        // unbounded only to the right of its start
        assert!(!open.overlaps(&before));
        assert!(open.overlaps(&touching));
        assert!(open.overlaps(&EffectiveWindow::open(d(2020, 1, 1))));
    }

}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset)
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            a_from in 0i64..300, a_len in 0i64..300,
            b_from in 0i64..300, b_len in 0i64..300
        ) {
            let a = EffectiveWindow::bounded(day(a_from), day(a_from + a_len)).unwrap();
            let b = EffectiveWindow::bounded(day(b_from), day(b_from + b_len)).unwrap();
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn overlap_iff_shared_date(
            a_from in 0i64..60, a_len in 0i64..60,
            b_from in 0i64..60, b_len in 0i64..60
        ) {
            let a = EffectiveWindow::bounded(day(a_from), day(a_from + a_len)).unwrap();
            let b = EffectiveWindow::bounded(day(b_from), day(b_from + b_len)).unwrap();
            let shared = (0..180).any(|o| a.contains(day(o)) && b.contains(day(o)));
            prop_assert_eq!(a.overlaps(&b), shared);
        }
    }
}
