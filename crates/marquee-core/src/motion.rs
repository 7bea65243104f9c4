#![forbid(unsafe_code)]

//! Motion preferences and small timing helpers.
//!
//! # Invariants
//!
//! 1. Under [`MotionPreference::Reduced`], every scaled duration is zero.
//! 2. [`stagger_delay`] is monotonically non-decreasing in `index` and never
//!    exceeds `cap`.
//! 3. [`damp`] output is always within `[-limit, limit]`.

use std::time::Duration;

/// The user's motion preference (`prefers-reduced-motion`), read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionPreference {
    /// Animations allowed.
    #[default]
    Full,
    /// The user asked for reduced motion.
    Reduced,
}

impl MotionPreference {
    /// Build from the `prefers-reduced-motion: reduce` media query result.
    #[must_use]
    pub const fn from_reduced_flag(reduced: bool) -> Self {
        if reduced { Self::Reduced } else { Self::Full }
    }

    #[inline]
    #[must_use]
    pub const fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }

    /// Scale an animation duration for this preference.
    #[must_use]
    pub const fn scale(self, duration: Duration) -> Duration {
        match self {
            Self::Full => duration,
            Self::Reduced => Duration::ZERO,
        }
    }
}

/// Linear stagger for the `index`-th element, capped at `cap`.
#[must_use]
pub fn stagger_delay(index: usize, step: Duration, cap: Duration) -> Duration {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    step.checked_mul(index).map_or(cap, |d| d.min(cap))
}

/// Scale `value` by `factor` and clamp the result to `[-limit, limit]`.
///
/// A negative `limit` is treated as zero.
#[must_use]
pub fn damp(value: f32, factor: f32, limit: f32) -> f32 {
    let limit = limit.max(0.0);
    (value * factor).clamp(-limit, limit)
}
