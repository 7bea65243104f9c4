#![forbid(unsafe_code)]

//! `marquee-web` provides the browser-facing building blocks for Marquee.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes events and reads back
//!   style writes and pointer-capture commands.
//! - **Deterministic time**: the host supplies a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`; `marquee-wasm` wraps it with a
//! JS API.

pub mod page;
pub mod pointer_capture;
pub mod surface;

#[cfg(feature = "input-parser")]
pub mod input_parser;

use core::time::Duration;

pub use pointer_capture::{CaptureOp, PointerCaptureLedger};
pub use surface::{PatchBuffer, StyleKind, StylePatch, StyleSink, StyleSurface, StyleTarget};

/// Monotonic time source for driving the engine.
pub trait HostClock {
    /// Time since the clock's origin.
    fn now(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Never moves backwards.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl HostClock for DeterministicClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Wall-clock monotonic time since construction (`performance.now()` on wasm).
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: web_time::Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Convert host milliseconds (e.g. `performance.now()`) to a [`Duration`].
///
/// Host input can be noisy (NaN/inf/negative). Those clamp to a finite,
/// non-negative duration so scheduling never panics.
#[must_use]
pub fn duration_from_ms(ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        return Duration::ZERO;
    }
    if ms >= u64::MAX as f64 {
        return Duration::MAX;
    }
    let whole = ms.trunc();
    let nanos = (((ms - whole) * 1_000_000.0).round() as u64).min(999_999);
    Duration::from_millis(whole as u64) + Duration::from_nanos(nanos)
}

/// Convert a [`Duration`] to host milliseconds.
#[must_use]
pub fn duration_to_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_clock_is_monotonic() {
        let mut clock = DeterministicClock::new();
        clock.set(Duration::from_millis(50));
        clock.set(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(50));
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.now(), Duration::from_millis(66));
        clock.advance(Duration::MAX);
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn ms_conversion_clamps_noise() {
        assert_eq!(duration_from_ms(f64::NAN), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::NEG_INFINITY), Duration::ZERO);
        assert_eq!(duration_from_ms(-5.0), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::INFINITY), Duration::ZERO);
        assert_eq!(duration_from_ms(4200.0), Duration::from_millis(4200));
        assert_eq!(duration_from_ms(16.5), Duration::from_micros(16_500));
        assert_eq!(duration_from_ms(1e300), Duration::MAX);
        assert_eq!(duration_to_ms(Duration::from_millis(720)), 720.0);
    }
}
