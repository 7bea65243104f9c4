#![forbid(unsafe_code)]

//! Autoplay scheduling.
//!
//! [`AutoplayScheduler`] is a small state machine with a single authoritative
//! tick deadline. Pause reasons are tracked as independent [`PauseHolds`]:
//! the tick is armed only while no hold is set, and releasing the last hold
//! restarts a full interval.
//!
//! A delayed resume (the grace period after a drag or wheel) is modelled as
//! a pending release of specific holds. Taking any of those holds again
//! cancels the pending release, so a resume scheduled before a new drag
//! can never end that drag's pause early. Holds not covered by the pending
//! release (hover, focus, hidden page) are never cleared by it.
//!
//! # Invariants
//!
//! 1. A tick deadline exists iff the scheduler is enabled, started, and holds
//!    are empty.
//! 2. At most one tick deadline and at most one pending resume exist;
//!    rescheduling replaces, never stacks.
//! 3. A disabled scheduler never arms anything.
//! 4. Every fired tick moves the tick deadline strictly past `now`, or
//!    disarms the tick when no such deadline is representable.

use std::time::Duration;

use bitflags::bitflags;

bitflags! {
    /// Reasons autoplay is stopped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PauseHolds: u8 {
        /// Pointer is over the carousel.
        const HOVER       = 0b0001;
        /// Focus is inside the carousel.
        const FOCUS       = 0b0010;
        /// A drag or wheel interaction is in progress or in its grace period.
        const INTERACTION = 0b0100;
        /// The page is hidden.
        const HIDDEN      = 0b1000;
    }
}

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    /// Autoplay never runs (reduced motion or zero interval).
    Disabled,
    /// Enabled but not started yet.
    Stopped,
    /// Ticking; the next tick is due at `next_tick`.
    Running { next_tick: Duration },
    /// Stopped by at least one hold.
    Paused {
        holds: PauseHolds,
        /// Pending delayed release, if any.
        resume_at: Option<Duration>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingResume {
    at: Duration,
    holds: PauseHolds,
}

/// Recurring autoplay tick with pause holds and a cancelable delayed resume.
#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    interval: Duration,
    resume_delay: Duration,
    enabled: bool,
    started: bool,
    holds: PauseHolds,
    next_tick: Option<Duration>,
    pending_resume: Option<PendingResume>,
}

impl AutoplayScheduler {
    /// Create a scheduler. A zero `interval` disables autoplay.
    #[must_use]
    pub fn new(interval: Duration, resume_delay: Duration) -> Self {
        Self {
            interval,
            resume_delay,
            enabled: !interval.is_zero(),
            started: false,
            holds: PauseHolds::empty(),
            next_tick: None,
            pending_resume: None,
        }
    }

    /// A scheduler that never ticks.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    #[must_use]
    pub const fn holds(&self) -> PauseHolds {
        self.holds
    }

    /// Whether any hold is set.
    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        !self.holds.is_empty()
    }

    /// Whether a tick is armed.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    #[must_use]
    pub fn state(&self) -> AutoplayState {
        if !self.enabled {
            return AutoplayState::Disabled;
        }
        if let Some(next_tick) = self.next_tick {
            return AutoplayState::Running { next_tick };
        }
        if self.holds.is_empty() {
            return AutoplayState::Stopped;
        }
        AutoplayState::Paused {
            holds: self.holds,
            resume_at: self.pending_resume.map(|p| p.at),
        }
    }

    /// Pending tick deadline.
    #[inline]
    #[must_use]
    pub fn tick_deadline(&self) -> Option<Duration> {
        self.next_tick
    }

    /// Pending delayed-resume deadline.
    #[inline]
    #[must_use]
    pub fn resume_deadline(&self) -> Option<Duration> {
        self.pending_resume.map(|p| p.at)
    }

    /// Earliest of the tick and resume deadlines.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.next_tick, self.resume_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Begin ticking. Returns `true` if a tick was armed.
    pub fn start(&mut self, now: Duration) -> bool {
        if !self.enabled {
            return false;
        }
        self.started = true;
        self.arm(now)
    }

    /// Restart the countdown if running. Returns `true` if re-armed.
    ///
    /// While paused this does nothing; the countdown restarts when the last
    /// hold is released.
    pub fn restart(&mut self, now: Duration) -> bool {
        if self.next_tick.is_none() {
            return false;
        }
        self.arm(now)
    }

    /// Set `reason`. Stops the tick and cancels any pending release that
    /// covers `reason`. Returns `true` if this stopped a running tick.
    pub fn hold(&mut self, reason: PauseHolds, _now: Duration) -> bool {
        if self
            .pending_resume
            .is_some_and(|p| p.holds.intersects(reason))
        {
            self.pending_resume = None;
        }
        self.holds |= reason;
        self.next_tick.take().is_some()
    }

    /// Clear `reason` now. Returns `true` if this re-armed the tick.
    pub fn release(&mut self, reason: PauseHolds, now: Duration) -> bool {
        if let Some(p) = self.pending_resume.as_mut() {
            p.holds.remove(reason);
            if p.holds.is_empty() {
                self.pending_resume = None;
            }
        }
        self.holds.remove(reason);
        self.arm(now)
    }

    /// Clear `reason` after the grace delay, replacing any pending release.
    ///
    /// With a zero delay this is [`release`](Self::release).
    pub fn release_after(&mut self, reason: PauseHolds, now: Duration) -> bool {
        if self.resume_delay.is_zero() {
            return self.release(reason, now);
        }
        let holds = self
            .pending_resume
            .map_or(reason, |p| p.holds | reason);
        self.pending_resume = Some(PendingResume {
            at: now.saturating_add(self.resume_delay),
            holds,
        });
        false
    }

    /// Apply a due delayed resume. Returns `true` if the tick was re-armed.
    pub fn fire_resume(&mut self, now: Duration) -> bool {
        match self.pending_resume {
            Some(p) if p.at <= now => {
                self.pending_resume = None;
                self.holds.remove(p.holds);
                self.arm(now)
            }
            _ => false,
        }
    }

    /// Consume a due tick. Returns `true` if a tick fired.
    ///
    /// The cadence follows the original deadline; missed ticks collapse into
    /// this one.
    pub fn fire_tick(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_tick.filter(|due| *due <= now) else {
            return false;
        };
        let after_now = |t: &Duration| *t > now;
        self.next_tick = due
            .checked_add(self.interval)
            .filter(after_now)
            .or_else(|| now.checked_add(self.interval).filter(after_now));
        true
    }

    fn arm(&mut self, now: Duration) -> bool {
        if !self.enabled || !self.started || !self.holds.is_empty() {
            return false;
        }
        self.next_tick = Some(now.saturating_add(self.interval));
        true
    }
}
