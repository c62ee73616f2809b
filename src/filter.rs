//! Per-pedal change detection.
//!
//! A [`ChangeFilter`] remembers the last value that was *successfully*
//! transmitted for one pedal. Evaluation and commit are separate steps so
//! a failed send leaves the filter untouched:
//!
//! ```text
//! Unset ──(any value, on send)──▶ Tracking(v)
//! Tracking(p) ──(|c - p| ≥ threshold, on send)──▶ Tracking(c)
//! ```

/// Minimum MIDI-value difference that counts as a change.
pub const CHANGE_THRESHOLD: u8 = 2;

/// Last-transmitted state for one pedal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeFilter {
    /// Nothing sent since initialisation; the next value always qualifies.
    #[default]
    Unset,
    /// Holds the last value that was sent.
    Tracking(u8),
}

impl ChangeFilter {
    /// Returns `true` if `current` differs enough from the last sent value
    /// to be worth transmitting.
    ///
    /// Always `true` in the [`Unset`](ChangeFilter::Unset) state. Does not
    /// modify the filter; call [`commit()`](Self::commit) once the send is
    /// confirmed.
    pub fn qualifies(&self, current: u8, threshold: u8) -> bool {
        match *self {
            ChangeFilter::Unset => true,
            ChangeFilter::Tracking(prev) => prev.abs_diff(current) >= threshold,
        }
    }

    /// Record `value` as transmitted.
    pub fn commit(&mut self, value: u8) {
        *self = ChangeFilter::Tracking(value);
    }

    /// Return to [`Unset`](ChangeFilter::Unset).
    pub fn reset(&mut self) {
        *self = ChangeFilter::Unset;
    }

    /// The last transmitted value, if any.
    pub fn last_sent(&self) -> Option<u8> {
        match *self {
            ChangeFilter::Unset => None,
            ChangeFilter::Tracking(value) => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_always_qualifies() {
        let filter = ChangeFilter::default();
        assert_eq!(filter, ChangeFilter::Unset);
        for value in [0, 1, 64, 127] {
            assert!(filter.qualifies(value, CHANGE_THRESHOLD));
        }
    }

    #[test]
    fn difference_of_one_is_suppressed() {
        let filter = ChangeFilter::Tracking(64);
        assert!(!filter.qualifies(64, CHANGE_THRESHOLD));
        assert!(!filter.qualifies(63, CHANGE_THRESHOLD));
        assert!(!filter.qualifies(65, CHANGE_THRESHOLD));
    }

    #[test]
    fn difference_of_two_passes() {
        let filter = ChangeFilter::Tracking(64);
        assert!(filter.qualifies(62, CHANGE_THRESHOLD));
        assert!(filter.qualifies(66, CHANGE_THRESHOLD));
        assert!(filter.qualifies(0, CHANGE_THRESHOLD));
        assert!(filter.qualifies(127, CHANGE_THRESHOLD));
    }

    #[test]
    fn edges_of_range() {
        assert!(!ChangeFilter::Tracking(0).qualifies(1, CHANGE_THRESHOLD));
        assert!(ChangeFilter::Tracking(0).qualifies(2, CHANGE_THRESHOLD));
        assert!(!ChangeFilter::Tracking(127).qualifies(126, CHANGE_THRESHOLD));
        assert!(ChangeFilter::Tracking(127).qualifies(125, CHANGE_THRESHOLD));
    }

    #[test]
    fn qualifies_does_not_mutate() {
        let filter = ChangeFilter::Tracking(10);
        let _ = filter.qualifies(50, CHANGE_THRESHOLD);
        assert_eq!(filter.last_sent(), Some(10));
    }

    #[test]
    fn commit_and_reset() {
        let mut filter = ChangeFilter::Unset;
        assert_eq!(filter.last_sent(), None);

        filter.commit(0);
        assert_eq!(filter.last_sent(), Some(0));
        assert!(!filter.qualifies(1, CHANGE_THRESHOLD));

        filter.reset();
        assert_eq!(filter, ChangeFilter::Unset);
        assert!(filter.qualifies(0, CHANGE_THRESHOLD));
    }
}
