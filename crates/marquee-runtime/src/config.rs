#![forbid(unsafe_code)]

//! Carousel tunables as data.
//!
//! [`CarouselConfig`] gathers every timing, threshold, and presentation
//! constant of the carousel into one struct. With the `config` feature it can
//! be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # carousel.toml
//! transition_ms = 600
//! autoplay_interval_ms = 5000
//! drag_policy = "continuous"
//! ```
//!
//! ```rust,ignore
//! let config = CarouselConfig::from_toml_file("carousel.toml")?.validated()?;
//! let config = CarouselConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `CarouselConfig::default()` reproduces the page's stock behavior: a 720 ms
//! transition lock, a 4.2 s autoplay interval, a 50 px swipe threshold and
//! three visible slots on each side.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use marquee_core::carousel::{DragPolicy, GestureConfig, SlotConfig, SwipeSign, WheelAxis};

// ---------------------------------------------------------------------------
// CarouselConfig
// ---------------------------------------------------------------------------

/// Tunables for one carousel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CarouselConfig {
    /// Animation-lock duration (ms). Forced to 0 under reduced motion. Default: 720.
    pub transition_ms: u64,

    /// Autoplay period (ms). 0 disables autoplay. Default: 4200.
    pub autoplay_interval_ms: u64,

    /// Grace delay before autoplay resumes after a drag or wheel (ms). Default: 800.
    pub resume_delay_ms: u64,

    /// Drag/swipe step threshold (px). Default: 50.
    pub swipe_threshold_px: f32,

    /// Items further than this from the active item are hidden. Default: 3.
    pub max_visible_slots: u32,

    /// Opacity falloff per slot of distance. Default: 0.16.
    pub opacity_step: f32,

    /// Stacking order of the active item. Default: 100.
    pub z_base: i32,

    /// Drag-to-step policy. Default: release.
    #[cfg_attr(
        feature = "config",
        serde(
            serialize_with = "serialize_drag_policy",
            deserialize_with = "deserialize_drag_policy"
        )
    )]
    pub drag_policy: DragPolicy,

    /// Which wheel axis must dominate for a step. Default: horizontal.
    #[cfg_attr(
        feature = "config",
        serde(
            serialize_with = "serialize_wheel_axis",
            deserialize_with = "deserialize_wheel_axis"
        )
    )]
    pub wheel_axis: WheelAxis,

    /// Live drag feedback factor. Default: 0.18.
    pub drag_feedback_factor: f32,

    /// Live drag feedback clamp (px). Default: 38.
    pub drag_feedback_limit_px: f32,

    /// Drag direction to step mapping. Default: natural.
    #[cfg_attr(
        feature = "config",
        serde(
            serialize_with = "serialize_swipe_sign",
            deserialize_with = "deserialize_swipe_sign"
        )
    )]
    pub swipe_sign: SwipeSign,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let gesture = GestureConfig::default();
        let slot = SlotConfig::default();
        Self {
            transition_ms: 720,
            autoplay_interval_ms: 4200,
            resume_delay_ms: 800,
            swipe_threshold_px: gesture.swipe_threshold,
            max_visible_slots: slot.max_visible,
            opacity_step: slot.opacity_step,
            z_base: slot.z_base,
            drag_policy: gesture.drag_policy,
            wheel_axis: gesture.wheel_axis,
            drag_feedback_factor: gesture.feedback_factor,
            drag_feedback_limit_px: gesture.feedback_limit,
            swipe_sign: gesture.swipe_sign,
        }
    }
}

impl CarouselConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.swipe_threshold_px.is_finite() && self.swipe_threshold_px > 0.0) {
            errors.push(format!(
                "swipe_threshold_px must be > 0, got {}",
                self.swipe_threshold_px
            ));
        }
        if self.max_visible_slots == 0 {
            errors.push("max_visible_slots must be >= 1".into());
        }
        let max_step = 1.0 / self.max_visible_slots.max(1) as f32;
        if !(self.opacity_step > 0.0 && self.opacity_step <= max_step) {
            errors.push(format!(
                "opacity_step must be in (0, {max_step}], got {}",
                self.opacity_step
            ));
        }
        if !(self.drag_feedback_factor.is_finite() && self.drag_feedback_factor >= 0.0) {
            errors.push(format!(
                "drag_feedback_factor must be >= 0, got {}",
                self.drag_feedback_factor
            ));
        }
        if !(self.drag_feedback_limit_px.is_finite() && self.drag_feedback_limit_px >= 0.0) {
            errors.push(format!(
                "drag_feedback_limit_px must be >= 0, got {}",
                self.drag_feedback_limit_px
            ));
        }
        if self.autoplay_interval_ms != 0 && self.autoplay_interval_ms <= self.transition_ms {
            errors.push(format!(
                "autoplay_interval_ms ({}) must exceed transition_ms ({})",
                self.autoplay_interval_ms, self.transition_ms
            ));
        }

        errors
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub const fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    #[must_use]
    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    #[must_use]
    pub const fn resume_delay(&self) -> Duration {
        Duration::from_millis(self.resume_delay_ms)
    }

    /// Convert to the core [`GestureConfig`].
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            swipe_threshold: self.swipe_threshold_px,
            drag_policy: self.drag_policy,
            wheel_axis: self.wheel_axis,
            swipe_sign: self.swipe_sign,
            feedback_factor: self.drag_feedback_factor,
            feedback_limit: self.drag_feedback_limit_px,
        }
    }

    /// Convert to the core [`SlotConfig`].
    #[must_use]
    pub fn to_slot_config(&self) -> SlotConfig {
        SlotConfig {
            max_visible: self.max_visible_slots,
            opacity_step: self.opacity_step,
            z_base: self.z_base,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a carousel configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for core enums
// ---------------------------------------------------------------------------

#[cfg(feature = "config")]
fn serialize_drag_policy<S>(policy: &DragPolicy, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(match policy {
        DragPolicy::Release => "release",
        DragPolicy::Continuous => "continuous",
    })
}

#[cfg(feature = "config")]
fn deserialize_drag_policy<'de, D>(deserializer: D) -> Result<DragPolicy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "release" | "Release" => Ok(DragPolicy::Release),
        "continuous" | "Continuous" => Ok(DragPolicy::Continuous),
        other => Err(serde::de::Error::custom(format!(
            "unknown drag policy: {other}"
        ))),
    }
}

#[cfg(feature = "config")]
fn serialize_wheel_axis<S>(axis: &WheelAxis, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(match axis {
        WheelAxis::Horizontal => "horizontal",
        WheelAxis::Vertical => "vertical",
    })
}

#[cfg(feature = "config")]
fn deserialize_wheel_axis<'de, D>(deserializer: D) -> Result<WheelAxis, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "horizontal" | "Horizontal" => Ok(WheelAxis::Horizontal),
        "vertical" | "Vertical" => Ok(WheelAxis::Vertical),
        other => Err(serde::de::Error::custom(format!(
            "unknown wheel axis: {other}"
        ))),
    }
}

#[cfg(feature = "config")]
fn serialize_swipe_sign<S>(sign: &SwipeSign, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(match sign {
        SwipeSign::Natural => "natural",
        SwipeSign::Inverted => "inverted",
    })
}

#[cfg(feature = "config")]
fn deserialize_swipe_sign<'de, D>(deserializer: D) -> Result<SwipeSign, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "natural" | "Natural" => Ok(SwipeSign::Natural),
        "inverted" | "Inverted" => Ok(SwipeSign::Inverted),
        other => Err(serde::de::Error::custom(format!(
            "unknown swipe sign: {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
