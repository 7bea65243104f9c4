#![forbid(unsafe_code)]

//! Runtime: the carousel engine, its autoplay scheduler, and configuration.
//!
//! # Role in Marquee
//! `marquee-runtime` owns time. It combines the pure model from
//! `marquee-core` with an [`AutoplayScheduler`] and drives a host through the
//! [`CarouselHost`] adapter trait.
//!
//! # Time model
//! The engine never sleeps and never spawns. Every operation that may arm or
//! consume a timer takes an explicit `now: Duration` (monotonic, since page
//! load). The host arms one platform timer for
//! [`CarouselEngine::next_deadline`] and calls [`CarouselEngine::advance`]
//! when it fires. Spurious or late wakes are harmless.
//!
//! # Key Components
//! - [`CarouselEngine`]: mount, commands, event routing, timer advancement.
//! - [`AutoplayScheduler`]: recurring tick plus independent pause holds and a
//!   cancelable delayed resume.
//! - [`CarouselConfig`]: tunables, optionally loaded from TOML or JSON with
//!   the `config` feature.

pub mod config;
pub mod engine;
pub mod host;
pub mod scheduler;

pub use config::{CarouselConfig, ConfigError};
pub use engine::{CarouselEngine, EventOutcome, MountError, StepOptions, StepSource};
pub use host::{CaptureError, CarouselHost};
pub use scheduler::{AutoplayScheduler, AutoplayState, PauseHolds};
