#![forbid(unsafe_code)]

//! Reveal-on-scroll with a staggered delay.
//!
//! Each `.reveal` element gets a `--reveal-delay` of `min(index * 60, 320)` ms
//! and receives `is-visible` the first time it intersects. Once revealed it
//! is unobserved, so it never hides again.

use std::time::Duration;

use marquee_core::motion::{MotionPreference, stagger_delay};

use super::IntersectionEntry;

pub const REVEAL_STEP: Duration = Duration::from_millis(60);
pub const REVEAL_CAP: Duration = Duration::from_millis(320);
/// `IntersectionObserver` options used by the host.
pub const REVEAL_THRESHOLD: f32 = 0.2;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -8% 0px";

/// Stagger delay for the `index`-th element.
#[must_use]
pub fn reveal_delay(index: usize) -> Duration {
    stagger_delay(index, REVEAL_STEP, REVEAL_CAP)
}

/// `--reveal-delay` value for the `index`-th element.
#[must_use]
pub fn reveal_delay_css(index: usize) -> String {
    format!("{}ms", reveal_delay(index).as_millis())
}

/// Which reveal elements are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTracker {
    revealed: Vec<bool>,
    observing: bool,
}

impl RevealTracker {
    /// Track `count` elements.
    ///
    /// Under reduced motion, or without `IntersectionObserver`, every element
    /// is revealed up front and nothing is observed.
    #[must_use]
    pub fn new(count: usize, motion: MotionPreference, intersection_supported: bool) -> Self {
        let immediate = motion.is_reduced() || !intersection_supported;
        Self {
            revealed: vec![immediate; count],
            observing: !immediate && count > 0,
        }
    }

    /// Whether the host should create an observer.
    #[must_use]
    pub const fn is_observing(&self) -> bool {
        self.observing
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Elements not yet revealed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }

    /// Apply one observer batch. Returns the newly revealed indices in batch
    /// order; the host adds `is-visible` and unobserves each one.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) -> Vec<usize> {
        let mut newly = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if let Some(slot) = self.revealed.get_mut(entry.target)
                && !*slot
            {
                *slot = true;
                newly.push(entry.target);
            }
        }
        if self.pending() == 0 {
            self.observing = false;
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn delays_are_staggered_and_capped() {
        assert_eq!(reveal_delay_css(0), "0ms");
        assert_eq!(reveal_delay_css(1), "60ms");
        assert_eq!(reveal_delay_css(5), "300ms");
        assert_eq!(reveal_delay_css(6), "320ms");
        assert_eq!(reveal_delay_css(40), "320ms");
    }

    #[test]
    fn reduced_motion_reveals_everything() {
        let tracker = RevealTracker::new(4, MotionPreference::Reduced, true);
        assert!(!tracker.is_observing());
        assert_eq!(tracker.pending(), 0);

        let tracker = RevealTracker::new(4, MotionPreference::Full, false);
        assert!(tracker.is_revealed(3));
    }

    #[test]
    fn reveals_once_on_first_intersection() {
        let mut tracker = RevealTracker::new(3, MotionPreference::Full, true);
        assert!(tracker.is_observing());
        let batch = [
            IntersectionEntry::new(1, true, 0.3),
            IntersectionEntry::new(2, false, 0.0),
            IntersectionEntry::new(1, true, 0.6),
        ];
        assert_eq!(tracker.observe(&batch), vec![1]);
        assert_eq!(tracker.observe(&[IntersectionEntry::new(1, false, 0.0)]), Vec::<usize>::new());
        assert!(tracker.is_revealed(1), "leaving does not hide");
        assert_eq!(tracker.pending(), 2);
    }

    #[test]
    fn stops_observing_when_all_revealed() {
        let mut tracker = RevealTracker::new(2, MotionPreference::Full, true);
        tracker.observe(&[
            IntersectionEntry::new(0, true, 0.5),
            IntersectionEntry::new(1, true, 0.5),
            IntersectionEntry::new(9, true, 1.0),
        ]);
        assert!(!tracker.is_observing());
    }
}
