#![forbid(unsafe_code)]

//! WASM carousel runner for Marquee.
//!
//! This crate provides [`CarouselRunner`], a `wasm-bindgen`-exported struct
//! that wraps `marquee_runtime::CarouselEngine` over a buffered
//! `marquee_web::StyleSurface` and exposes it to JavaScript for host-driven
//! execution:
//!
//! 1. The page forwards listener payloads with `pushEncodedInput(json, now)`.
//! 2. After each call it applies `drainPatches()` and `drainCaptures()`.
//! 3. It keeps exactly one timer armed for `nextDeadlineMs()` and calls
//!    `advance(now)` when it fires.
//!
//! [`PageRunner`] exposes the page helpers (nav menu, reveal-on-scroll,
//! active section, card tilt, hero progress) the same way.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{CarouselRunner, PageRunner};

// Cores are used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod page_core;
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;
