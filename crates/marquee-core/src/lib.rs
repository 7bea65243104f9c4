#![forbid(unsafe_code)]

//! Core: host events, geometry, motion helpers, and the pure carousel model.
//!
//! # Role in Marquee
//! `marquee-core` is the deterministic layer. It owns the normalized event
//! types routed from the page, and the carousel model that turns those events
//! into index changes and per-item visual attributes.
//!
//! # Primary responsibilities
//! - **HostEvent**: canonical input events (pointer, wheel, key, focus,
//!   visibility, resize, item click).
//! - **Ring**: circular index arithmetic over a fixed item count.
//! - **SlotView**: per-item visual attributes derived from the circular offset.
//! - **TransitionController**: the active index plus the animation lock.
//! - **GestureResolver**: pointer-drag and wheel input to discrete steps.
//!
//! # How it fits in the system
//! Nothing in this crate owns a timer or touches a host. Time arrives as an
//! explicit `now: Duration`, and results are returned as values. The runtime
//! (`marquee-runtime`) schedules timers and applies results to a host.

pub mod carousel;
pub mod event;
pub mod geometry;
pub mod motion;
