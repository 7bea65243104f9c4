#![forbid(unsafe_code)]

//! Pointer-driven tilt for `[data-tilt]` cards.
//!
//! The latest pointer position within a frame wins; the host schedules at
//! most one animation frame per card.

use marquee_core::geometry::{Point, Rect};
use marquee_core::motion::MotionPreference;

use super::FrameGate;

/// Degrees of rotation about the Y axis across the card's full width.
pub const TILT_Y_RANGE_DEG: f32 = 10.0;
/// Degrees of rotation about the X axis across the card's full height.
pub const TILT_X_RANGE_DEG: f32 = 8.0;

/// A card rotation in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub x_deg: f32,
    pub y_deg: f32,
}

impl Tilt {
    pub const FLAT: Self = Self {
        x_deg: 0.0,
        y_deg: 0.0,
    };

    /// Tilt for a pointer at `point` over a card laid out at `rect`.
    /// `None` for an empty rect.
    #[must_use]
    pub fn from_pointer(rect: &Rect, point: Point) -> Option<Self> {
        let (x, y) = rect.fraction_of(point)?;
        Some(Self {
            x_deg: (0.5 - y) * TILT_X_RANGE_DEG,
            y_deg: (x - 0.5) * TILT_Y_RANGE_DEG,
        })
    }

    /// `(--tilt-x, --tilt-y)` values.
    #[must_use]
    pub fn css(&self) -> (String, String) {
        if *self == Self::FLAT {
            return ("0deg".to_owned(), "0deg".to_owned());
        }
        (
            format!("{:.2}deg", self.x_deg),
            format!("{:.2}deg", self.y_deg),
        )
    }
}

/// Per-card tilt state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltCard {
    enabled: bool,
    pending: Option<Point>,
    gate: FrameGate,
}

impl TiltCard {
    /// Tilt is off entirely under reduced motion.
    #[must_use]
    pub const fn new(motion: MotionPreference) -> Self {
        Self {
            enabled: !motion.is_reduced(),
            pending: None,
            gate: FrameGate::new(),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `pointermove`. Returns `true` when the host must request a frame.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !self.enabled {
            return false;
        }
        self.pending = Some(point);
        self.gate.request()
    }

    /// Animation frame fired; `rect` is the card's current layout.
    pub fn frame(&mut self, rect: &Rect) -> Option<Tilt> {
        if !self.gate.fire() {
            return None;
        }
        Tilt::from_pointer(rect, self.pending.take()?)
    }

    /// `pointerleave` or `blur`: drop the pending frame and flatten.
    pub fn reset(&mut self) -> Option<Tilt> {
        if !self.enabled {
            return None;
        }
        self.gate.cancel();
        self.pending = None;
        Some(Tilt::FLAT)
    }
}
