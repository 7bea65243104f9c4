#![forbid(unsafe_code)]

//! Active index and animation lock.
//!
//! [`TransitionController`] owns the only mutable index state of a carousel.
//! An accepted [`go_to`](TransitionController::go_to) moves the index and
//! locks further index changes until the transition has settled.
//!
//! # Invariants
//!
//! 1. `active` is always in `[0, count)`.
//! 2. `is_animating()` is true from an accepted change until `settle()` is
//!    observed at or after `unlock_at`, and false otherwise.
//! 3. With a zero transition duration the lock is never taken.
//! 4. At most one unlock deadline exists; a new transition replaces it.
//! 5. A rejected `go_to` changes nothing.
//!
//! # Failure Modes
//!
//! - Target equals the active index: rejected with [`GoToRejected::SameTarget`].
//! - Lock held: rejected with [`GoToRejected::Locked`]. Callers drop the
//!   command; nothing is queued.

use std::time::Duration;

use super::Step;
use super::ring::Ring;

/// Why a `go_to` did not change the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoToRejected {
    /// The normalized target is already active.
    SameTarget,
    /// A transition is still settling.
    Locked,
}

/// An accepted index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    /// When the lock releases, or `None` if the lock was skipped.
    pub unlock_at: Option<Duration>,
}

/// Active index plus animation lock.
#[derive(Debug, Clone)]
pub struct TransitionController {
    ring: Ring,
    active: usize,
    duration: Duration,
    unlock_at: Option<Duration>,
}

impl TransitionController {
    /// Start at index 0 with the given lock duration.
    #[must_use]
    pub const fn new(ring: Ring, duration: Duration) -> Self {
        Self {
            ring,
            active: 0,
            duration,
            unlock_at: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn ring(&self) -> Ring {
        self.ring
    }

    #[inline]
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether a transition is settling.
    #[inline]
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.unlock_at.is_some()
    }

    /// Pending unlock deadline, if any.
    #[inline]
    #[must_use]
    pub const fn unlock_deadline(&self) -> Option<Duration> {
        self.unlock_at
    }

    /// Release the lock if its deadline has passed. Returns `true` if released.
    pub fn settle(&mut self, now: Duration) -> bool {
        match self.unlock_at {
            Some(deadline) if now >= deadline => {
                self.unlock_at = None;
                true
            }
            _ => false,
        }
    }

    /// Move to `target` (any integer, normalized by wrapping).
    pub fn go_to(&mut self, target: i64, now: Duration) -> Result<Transition, GoToRejected> {
        self.settle(now);
        let target = self.ring.wrap(target);
        if target == self.active {
            return Err(GoToRejected::SameTarget);
        }
        if self.is_animating() {
            return Err(GoToRejected::Locked);
        }

        let from = self.active;
        self.active = target;
        self.unlock_at = if self.duration.is_zero() {
            None
        } else {
            Some(now.saturating_add(self.duration))
        };
        Ok(Transition {
            from,
            to: target,
            unlock_at: self.unlock_at,
        })
    }

    /// Move one step from the active index.
    pub fn step(&mut self, step: Step, now: Duration) -> Result<Transition, GoToRejected> {
        let active = self.active as i64;
        self.go_to(active + step.signum(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_720: Duration = Duration::from_millis(720);

    fn controller(count: usize, duration: Duration) -> TransitionController {
        TransitionController::new(Ring::new(count).unwrap(), duration)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn next_next_previous() {
        let mut c = controller(5, MS_720);
        assert_eq!(c.step(Step::Next, ms(0)).map(|t| t.to), Ok(1));
        assert_eq!(c.step(Step::Next, ms(1000)).map(|t| t.to), Ok(2));
        assert_eq!(c.step(Step::Previous, ms(2000)).map(|t| t.to), Ok(1));
        assert_eq!(c.active(), 1);
    }

    #[test]
    fn same_target_is_rejected_without_locking() {
        let mut c = controller(5, MS_720);
        assert_eq!(c.go_to(5, ms(0)), Err(GoToRejected::SameTarget));
        assert!(!c.is_animating());
        assert_eq!(c.active(), 0);
    }

    #[test]
    fn locked_rejects_until_deadline() {
        let mut c = controller(5, MS_720);
        let t = c.go_to(2, ms(100)).unwrap();
        assert_eq!(t.unlock_at, Some(ms(820)));
        assert!(c.is_animating());

        assert_eq!(c.go_to(3, ms(500)), Err(GoToRejected::Locked));
        assert_eq!(c.active(), 2);

        // Lazily settles when the deadline has passed.
        assert_eq!(c.go_to(3, ms(820)).map(|t| t.from), Ok(2));
        assert_eq!(c.active(), 3);
    }

    #[test]
    fn settle_only_after_deadline() {
        let mut c = controller(3, MS_720);
        c.go_to(1, ms(0)).unwrap();
        assert!(!c.settle(ms(719)));
        assert!(c.is_animating());
        assert!(c.settle(ms(720)));
        assert!(!c.is_animating());
        assert!(!c.settle(ms(721)), "nothing left to settle");
    }

    #[test]
    fn zero_duration_never_locks() {
        let mut c = controller(4, Duration::ZERO);
        let t = c.go_to(1, ms(0)).unwrap();
        assert_eq!(t.unlock_at, None);
        assert!(!c.is_animating());
        assert!(c.go_to(2, ms(0)).is_ok());
        assert_eq!(c.unlock_deadline(), None);
    }

    #[test]
    fn negative_targets_wrap() {
        let mut c = controller(5, Duration::ZERO);
        assert_eq!(c.go_to(-1, ms(0)).map(|t| t.to), Ok(4));
        assert_eq!(c.step(Step::Next, ms(0)).map(|t| t.to), Ok(0));
    }
}
