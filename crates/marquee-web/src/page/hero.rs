#![forbid(unsafe_code)]

//! Hero scroll progress (`--hero-progress`).

use marquee_core::motion::MotionPreference;

use super::FrameGate;

/// Scroll progress through the hero in `[0, 1]`.
///
/// Travel spans the hero height plus a quarter of the viewport, so progress
/// starts as the hero's top enters from below.
#[must_use]
pub fn hero_progress(viewport_height: f32, hero_top: f32, hero_height: f32) -> f32 {
    let travel = (hero_height + viewport_height * 0.25).max(1.0);
    let raw = (viewport_height - hero_top) / travel;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

/// Frame-coalesced hero progress updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroParallax {
    motion: MotionPreference,
    gate: FrameGate,
}

impl HeroParallax {
    #[must_use]
    pub const fn new(motion: MotionPreference) -> Self {
        Self {
            motion,
            gate: FrameGate::new(),
        }
    }

    /// Value written once at startup. Under reduced motion it stays there.
    #[must_use]
    pub fn initial_value(&self) -> Option<String> {
        self.motion.is_reduced().then(|| "0".to_owned())
    }

    /// `scroll` or `resize`. Returns `true` when the host must request a frame.
    pub fn request_update(&mut self) -> bool {
        !self.motion.is_reduced() && self.gate.request()
    }

    /// Animation frame fired. Returns the formatted progress to write.
    pub fn frame(&mut self, viewport_height: f32, hero_top: f32, hero_height: f32) -> Option<String> {
        if !self.gate.fire() {
            return None;
        }
        Some(format!(
            "{:.4}",
            hero_progress(viewport_height, hero_top, hero_height)
        ))
    }
}
