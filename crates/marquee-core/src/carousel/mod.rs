#![forbid(unsafe_code)]

//! The circular carousel model.
//!
//! - [`Ring`]: wrap and signed circular offset over a fixed item count.
//! - [`SlotView`]: visual attributes derived from an item's offset.
//! - [`TransitionController`]: the active index and the animation lock.
//! - [`GestureResolver`]: pointer drags and wheel deltas to [`Step`]s.
//!
//! All types here are host-free and clock-free; callers pass `now`.

pub mod gesture;
pub mod ring;
pub mod slot;
pub mod transition;

pub use gesture::{
    CaptureCommand, DragPolicy, GestureConfig, GestureDispatch, GestureIgnoredReason,
    GestureOutcome, GesturePhase, GestureResolver, SwipeSign, WheelAxis,
};
pub use ring::Ring;
pub use slot::{SlotConfig, SlotView, emit_slots};
pub use transition::{GoToRejected, Transition, TransitionController};

/// One discrete navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Next,
    Previous,
}

impl Step {
    /// `+1` for [`Step::Next`], `-1` for [`Step::Previous`].
    #[inline]
    #[must_use]
    pub const fn signum(self) -> i64 {
        match self {
            Self::Next => 1,
            Self::Previous => -1,
        }
    }

    /// The step that moves toward a signed offset, or `None` for zero.
    #[must_use]
    pub const fn toward(delta: i64) -> Option<Self> {
        if delta > 0 {
            Some(Self::Next)
        } else if delta < 0 {
            Some(Self::Previous)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Step;

    #[test]
    fn step_toward_sign() {
        assert_eq!(Step::toward(3), Some(Step::Next));
        assert_eq!(Step::toward(-1), Some(Step::Previous));
        assert_eq!(Step::toward(0), None);
        assert_eq!(Step::Next.reversed(), Step::Previous);
        assert_eq!(Step::Previous.signum(), -1);
    }
}
