#![forbid(unsafe_code)]

//! Page-level helpers that live alongside the carousel.
//!
//! Each helper is a small state machine or pure function; the JS glue owns
//! the DOM listeners and observers and forwards their payloads here.
//!
//! - [`nav::NavMenu`]: mobile navigation open/close.
//! - [`reveal::RevealTracker`]: staggered reveal-on-scroll.
//! - [`sections::ActiveSectionTracker`]: highlight the most visible section link.
//! - [`tilt::TiltCard`]: pointer-driven card tilt.
//! - [`hero::HeroParallax`]: scroll progress through the hero.

pub mod hero;
pub mod nav;
pub mod reveal;
pub mod sections;
pub mod tilt;

/// One `IntersectionObserverEntry`, reduced to what the helpers read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Index of the observed element in the host's list.
    pub target: usize,
    pub is_intersecting: bool,
    pub intersection_ratio: f32,
}

impl IntersectionEntry {
    #[must_use]
    pub const fn new(target: usize, is_intersecting: bool, intersection_ratio: f32) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio,
        }
    }
}

/// Coalesces work into at most one pending animation frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Ask for a frame. Returns `true` when the host must call
    /// `requestAnimationFrame`; `false` when one is already pending.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// The frame fired. Returns whether one was pending.
    pub fn fire(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Drop the pending frame (`cancelAnimationFrame`).
    pub fn cancel(&mut self) -> bool {
        self.fire()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::FrameGate;

    #[test]
    fn frame_gate_coalesces_requests() {
        let mut gate = FrameGate::new();
        assert!(gate.request());
        assert!(!gate.request());
        assert!(gate.is_pending());
        assert!(gate.fire());
        assert!(!gate.fire());
        assert!(gate.request());
        assert!(gate.cancel());
        assert!(!gate.is_pending());
    }
}
