#![forbid(unsafe_code)]

//! Marquee public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

use std::fmt;
use std::time::Duration;

// --- Core re-exports -------------------------------------------------------

pub use marquee_core::carousel::{
    DragPolicy, GestureConfig, Ring, SlotConfig, SlotView, Step, SwipeSign, TransitionController,
    WheelAxis,
};
pub use marquee_core::event::{
    HostEvent, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerKind, Visibility,
    WheelEvent,
};
pub use marquee_core::geometry::{Point, Rect};
pub use marquee_core::motion::MotionPreference;

// --- Runtime re-exports ----------------------------------------------------

pub use marquee_runtime::{
    AutoplayState, CaptureError, CarouselConfig, CarouselEngine, CarouselHost, ConfigError,
    EventOutcome, MountError, PauseHolds, StepOptions, StepSource,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use marquee_web::{
    CaptureOp, DeterministicClock, HostClock, MonotonicClock, PatchBuffer, StylePatch, StyleSink,
    StyleSurface, StyleTarget,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Marquee.
#[derive(Debug)]
pub enum Error {
    /// The carousel could not be mounted on this page.
    Mount(MountError),
    /// The configuration could not be loaded or is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mount(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<MountError> for Error {
    fn from(err: MountError) -> Self {
        Self::Mount(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Marquee APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Mounting --------------------------------------------------------------

/// Validate `config`, then mount a carousel on `host`.
pub fn mount<H: CarouselHost>(
    host: H,
    config: CarouselConfig,
    motion: MotionPreference,
    now: Duration,
) -> Result<CarouselEngine<H>> {
    let config = config.validated()?;
    Ok(CarouselEngine::mount(host, &config, motion, now)?)
}

/// Mount a carousel, or do nothing when this page has none.
///
/// Pages without a carousel surface or with fewer than two items are not an
/// error: the carousel is a progressive enhancement. An invalid `config` is
/// skipped the same way, leaving the static markup in place.
pub fn mount_or_skip<H: CarouselHost>(
    host: H,
    config: &CarouselConfig,
    motion: MotionPreference,
    now: Duration,
) -> Option<CarouselEngine<H>> {
    let problems = config.validate();
    if !problems.is_empty() {
        tracing::debug!(?problems, "carousel mount skipped: invalid config");
        return None;
    }
    match CarouselEngine::mount(host, config, motion, now) {
        Ok(engine) => Some(engine),
        Err(err) => {
            tracing::debug!(%err, "carousel mount skipped");
            None
        }
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CarouselConfig, CarouselEngine, CarouselHost, Error, EventOutcome, HostEvent,
        MotionPreference, Result, SlotView, Step, mount, mount_or_skip,
    };

    #[cfg(feature = "web")]
    pub use crate::{PatchBuffer, StyleSurface};

    pub use crate::{core, runtime};

    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use marquee_core as core;
pub use marquee_runtime as runtime;
#[cfg(feature = "web")]
pub use marquee_web as web;
