//! Signed lags and bounds-checked access to sample windows.

use crate::core::types::Sample;
use std::fmt;

/// Signed offset of a synthesis position from its nominal `m * Ss` location.
///
/// Applying a lag to a position is checked: a lag that would move the
/// position below zero yields `None` instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lag(isize);

impl Lag {
    /// The zero lag.
    pub const ZERO: Lag = Lag(0);

    /// Create a lag from a signed offset.
    #[inline]
    pub const fn new(offset: isize) -> Self {
        Self(offset)
    }

    /// Returns the signed offset.
    #[inline]
    pub const fn get(self) -> isize {
        self.0
    }

    /// Shifts `position` by this lag, returning `None` below zero.
    #[inline]
    pub fn apply(self, position: usize) -> Option<usize> {
        position.checked_add_signed(self.0)
    }

    /// The next lag in the search order.
    #[inline]
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Lag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// Returns `signal[start..start + len]`, or `None` if any part lies outside `signal`.
#[inline]
pub fn window(signal: &[Sample], start: usize, len: usize) -> Option<&[Sample]> {
    signal.get(start..start.checked_add(len)?)
}

/// Mutable counterpart of [`window`].
#[inline]
pub fn window_mut(signal: &mut [Sample], start: usize, len: usize) -> Option<&mut [Sample]> {
    signal.get_mut(start..start.checked_add(len)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lag_apply() {
        assert_eq!(Lag::new(-5).apply(10), Some(5));
        assert_eq!(Lag::new(-10).apply(10), Some(0));
        assert_eq!(Lag::new(-11).apply(10), None);
        assert_eq!(Lag::new(7).apply(10), Some(17));
    }

    #[test]
    fn test_lag_ordering_and_display() {
        assert!(Lag::new(-3) < Lag::ZERO);
        assert_eq!(Lag::new(-3).next(), Lag::new(-2));
        assert_eq!(Lag::new(4).to_string(), "+4");
        assert_eq!(Lag::new(-4).to_string(), "-4");
    }

    #[test]
    fn test_window_bounds() {
        let signal = [1i16, 2, 3, 4, 5];
        assert_eq!(window(&signal, 1, 3), Some(&signal[1..4]));
        assert_eq!(window(&signal, 2, 3), Some(&signal[2..5]));
        assert_eq!(window(&signal, 3, 3), None);
        assert_eq!(window(&signal, usize::MAX, 2), None);
        assert_eq!(window(&signal, 5, 0), Some(&signal[5..5]));
    }

    #[test]
    fn test_window_mut_writes_in_place() {
        let mut signal = [0i16; 4];
        if let Some(w) = window_mut(&mut signal, 1, 2) {
            w.copy_from_slice(&[7, 8]);
        }
        assert_eq!(signal, [0, 7, 8, 0]);
        assert!(window_mut(&mut signal, 3, 2).is_none());
    }
}
