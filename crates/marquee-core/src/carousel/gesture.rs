#![forbid(unsafe_code)]

//! Gesture resolution: pointer drags and wheel deltas to discrete steps.
//!
//! [`GestureResolver`] is a two-phase state machine (`Idle` / `Dragging`)
//! over the pointer lifecycle of the carousel surface, plus a stateless wheel
//! classifier. Every call returns a [`GestureDispatch`] describing the step
//! to commit (if any), the pointer-capture command for the host, live drag
//! feedback, and why the input was ignored when it was.
//!
//! # Drag policies
//!
//! - [`DragPolicy::Release`]: moves only update feedback. On release, one
//!   step is committed if the net horizontal displacement exceeds the
//!   threshold and dominates the vertical displacement.
//! - [`DragPolicy::Continuous`]: moves accumulate horizontal displacement;
//!   each time the accumulator exceeds the threshold one step is committed and
//!   the accumulator restarts from zero (the remainder is dropped). Release
//!   adds no extra step.
//!
//! # Invariants
//!
//! 1. At most one pointer is tracked; events from any other pointer id are
//!    ignored.
//! 2. A vertical-dominant move sample never changes the accumulator and never
//!    commits a step.
//! 3. Every accepted pointer-down yields exactly one `Acquire`, and the
//!    matching up/cancel yields exactly one `Release` for the same id.
//! 4. A wheel event commits at most one step and never touches drag state.
//!
//! # Failure Modes
//!
//! - Non-primary mouse buttons do not start a drag.
//! - Up/cancel without an active pointer is ignored (no `Release`).

use super::Step;
use crate::event::{PointerButton, PointerEvent, PointerKind, WheelEvent};
use crate::geometry::Point;
use crate::motion::damp;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How pointer drags turn into steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPolicy {
    /// One decision per gesture, on release.
    #[default]
    Release,
    /// A step each time the accumulated drag crosses the threshold.
    Continuous,
}

/// Which wheel axis must dominate for a wheel event to step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelAxis {
    #[default]
    Horizontal,
    Vertical,
}

/// Mapping from drag direction to step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeSign {
    /// Dragging right (positive dx) reveals the previous item.
    #[default]
    Natural,
    /// Dragging right advances to the next item.
    Inverted,
}

/// Thresholds and policies for gesture resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Horizontal displacement (px) a swipe must exceed (default: 50).
    pub swipe_threshold: f32,
    /// Drag-to-step policy (default: release).
    pub drag_policy: DragPolicy,
    /// Dominant wheel axis (default: horizontal).
    pub wheel_axis: WheelAxis,
    /// Drag direction to step mapping (default: natural).
    pub swipe_sign: SwipeSign,
    /// Live feedback factor applied to the net horizontal drag (default: 0.18).
    pub feedback_factor: f32,
    /// Live feedback clamp in px (default: 38).
    pub feedback_limit: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            drag_policy: DragPolicy::Release,
            wheel_axis: WheelAxis::Horizontal,
            swipe_sign: SwipeSign::Natural,
            feedback_factor: 0.18,
            feedback_limit: 38.0,
        }
    }
}

impl GestureConfig {
    /// Step for a horizontal displacement, or `None` for zero.
    #[must_use]
    pub fn step_for_drag(&self, dx: f32) -> Option<Step> {
        let step = if dx < 0.0 {
            Step::Next
        } else if dx > 0.0 {
            Step::Previous
        } else {
            return None;
        };
        Some(match self.swipe_sign {
            SwipeSign::Natural => step,
            SwipeSign::Inverted => step.reversed(),
        })
    }
}

// ---------------------------------------------------------------------------
// Dispatch types
// ---------------------------------------------------------------------------

/// Host command for browser pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Resolver phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIgnoredReason {
    /// Mouse button other than primary.
    ButtonNotAllowed,
    /// Another pointer is already dragging.
    ActivePointerInProgress,
    /// No drag is in progress.
    NoActivePointer,
    /// The event belongs to a different pointer.
    PointerMismatch,
    /// Vertical motion dominates; left to page scrolling.
    VerticalDominant,
    /// The wheel moved mostly along the other axis.
    OffAxis,
    /// The wheel event had no usable delta.
    ZeroDelta,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    DragStarted,
    DragUpdated,
    DragEnded,
    DragCancelled,
    Wheel,
    Ignored(GestureIgnoredReason),
}

/// Result of one gesture input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDispatch {
    /// Step to commit, if any.
    pub step: Option<Step>,
    /// Pointer-capture command for the host, if any.
    pub capture: Option<CaptureCommand>,
    /// Live drag offset in px for the surface, if it changed.
    pub feedback: Option<f32>,
    pub outcome: GestureOutcome,
}

impl GestureDispatch {
    const fn ignored(reason: GestureIgnoredReason) -> Self {
        Self {
            step: None,
            capture: None,
            feedback: None,
            outcome: GestureOutcome::Ignored(reason),
        }
    }

    const fn outcome(outcome: GestureOutcome) -> Self {
        Self {
            step: None,
            capture: None,
            feedback: None,
            outcome,
        }
    }

    /// Whether the input was ignored.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, GestureOutcome::Ignored(_))
    }
}

// ---------------------------------------------------------------------------
// GestureResolver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragTracker {
    pointer_id: u32,
    start: Point,
    last: Point,
    accumulator: f32,
}

/// Stateful drag resolver plus wheel classifier.
#[derive(Debug, Clone)]
pub struct GestureResolver {
    config: GestureConfig,
    drag: Option<DragTracker>,
}

impl GestureResolver {
    #[must_use]
    pub const fn new(config: GestureConfig) -> Self {
        Self { config, drag: None }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        if self.drag.is_some() {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer id of the active drag, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.drag.map(|d| d.pointer_id)
    }

    /// Net unconsumed horizontal displacement of the active drag (0 when idle).
    #[must_use]
    pub fn accumulator(&self) -> f32 {
        self.drag.map_or(0.0, |d| d.accumulator)
    }

    /// Handle pointer-down on the carousel surface.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> GestureDispatch {
        if event.kind == PointerKind::Mouse && event.button != PointerButton::Primary {
            return GestureDispatch::ignored(GestureIgnoredReason::ButtonNotAllowed);
        }
        if self.drag.is_some() {
            return GestureDispatch::ignored(GestureIgnoredReason::ActivePointerInProgress);
        }

        self.drag = Some(DragTracker {
            pointer_id: event.pointer_id,
            start: event.position,
            last: event.position,
            accumulator: 0.0,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(pointer_id = event.pointer_id, "gesture: drag started");

        GestureDispatch {
            step: None,
            capture: Some(CaptureCommand::Acquire {
                pointer_id: event.pointer_id,
            }),
            feedback: Some(0.0),
            outcome: GestureOutcome::DragStarted,
        }
    }

    /// Handle pointer-move during a drag.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> GestureDispatch {
        let config = self.config;
        let Some(drag) = self.drag.as_mut() else {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActivePointer);
        };
        if drag.pointer_id != event.pointer_id {
            return GestureDispatch::ignored(GestureIgnoredReason::PointerMismatch);
        }

        let (sample_dx, sample_dy) = event.position.delta_from(drag.last);
        let (net_dx, net_dy) = event.position.delta_from(drag.start);
        drag.last = event.position;

        let feedback = (net_dy.abs() <= net_dx.abs())
            .then(|| damp(net_dx, config.feedback_factor, config.feedback_limit));

        if sample_dy.abs() > sample_dx.abs() {
            return GestureDispatch {
                feedback,
                ..GestureDispatch::ignored(GestureIgnoredReason::VerticalDominant)
            };
        }

        drag.accumulator += sample_dx;
        let mut step = None;
        if config.drag_policy == DragPolicy::Continuous
            && drag.accumulator.abs() > config.swipe_threshold
        {
            step = config.step_for_drag(drag.accumulator);
            drag.accumulator = 0.0;
        }

        GestureDispatch {
            step,
            feedback,
            ..GestureDispatch::outcome(GestureOutcome::DragUpdated)
        }
    }

    /// Handle pointer-up; resolves the swipe under [`DragPolicy::Release`].
    pub fn pointer_up(&mut self, event: &PointerEvent) -> GestureDispatch {
        self.finish(event, GestureOutcome::DragEnded)
    }

    /// Handle pointer-cancel; resolved exactly like pointer-up.
    pub fn pointer_cancel(&mut self, event: &PointerEvent) -> GestureDispatch {
        self.finish(event, GestureOutcome::DragCancelled)
    }

    fn finish(&mut self, event: &PointerEvent, outcome: GestureOutcome) -> GestureDispatch {
        let Some(drag) = self.drag else {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActivePointer);
        };
        if drag.pointer_id != event.pointer_id {
            return GestureDispatch::ignored(GestureIgnoredReason::PointerMismatch);
        }
        self.drag = None;

        let (dx, dy) = event.position.delta_from(drag.start);
        let step = match self.config.drag_policy {
            DragPolicy::Release if dx.abs() > self.config.swipe_threshold && dx.abs() > dy.abs() => {
                self.config.step_for_drag(dx)
            }
            _ => None,
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(pointer_id = drag.pointer_id, dx, dy, ?step, "gesture: drag finished");

        GestureDispatch {
            step,
            capture: Some(CaptureCommand::Release {
                pointer_id: drag.pointer_id,
            }),
            feedback: Some(0.0),
            outcome,
        }
    }

    /// Classify one wheel event. Never accumulates across events.
    #[must_use]
    pub fn wheel(&self, event: &WheelEvent) -> GestureDispatch {
        let (primary, cross) = match self.config.wheel_axis {
            WheelAxis::Horizontal => (event.dx, event.dy),
            WheelAxis::Vertical => (event.dy, event.dx),
        };
        if primary == 0.0 || !primary.is_finite() {
            return GestureDispatch::ignored(GestureIgnoredReason::ZeroDelta);
        }
        if cross.abs() >= primary.abs() {
            return GestureDispatch::ignored(GestureIgnoredReason::OffAxis);
        }
        GestureDispatch {
            step: Step::toward(if primary > 0.0 { 1 } else { -1 }),
            ..GestureDispatch::outcome(GestureOutcome::Wheel)
        }
    }

    /// Drop any drag in progress without emitting a step or capture command.
    pub fn reset(&mut self) {
        self.drag = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver() -> GestureResolver {
        GestureResolver::new(GestureConfig::default())
    }

    fn continuous() -> GestureResolver {
        GestureResolver::new(GestureConfig {
            drag_policy: DragPolicy::Continuous,
            ..GestureConfig::default()
        })
    }

    fn at(id: u32, x: f32, y: f32) -> PointerEvent {
        PointerEvent::mouse(id, x, y)
    }

    // --- Lifecycle ---

    #[test]
    fn down_acquires_capture() {
        let mut g = resolver();
        let d = g.pointer_down(&at(1, 100.0, 100.0));
        assert_eq!(d.outcome, GestureOutcome::DragStarted);
        assert_eq!(d.capture, Some(CaptureCommand::Acquire { pointer_id: 1 }));
        assert_eq!(g.phase(), GesturePhase::Dragging);
        assert_eq!(g.active_pointer_id(), Some(1));
    }

    #[test]
    fn secondary_mouse_button_is_ignored() {
        let mut g = resolver();
        let d = g.pointer_down(&at(1, 0.0, 0.0).with_button(PointerButton::Secondary));
        assert_eq!(
            d.outcome,
            GestureOutcome::Ignored(GestureIgnoredReason::ButtonNotAllowed)
        );
        assert!(!g.is_dragging());
    }

    #[test]
    fn touch_contact_always_starts() {
        let mut g = resolver();
        let touch = PointerEvent::touch(9, 0.0, 0.0).with_button(PointerButton::Other(5));
        assert_eq!(g.pointer_down(&touch).outcome, GestureOutcome::DragStarted);
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        let d = g.pointer_down(&PointerEvent::touch(2, 5.0, 5.0));
        assert_eq!(
            d.outcome,
            GestureOutcome::Ignored(GestureIgnoredReason::ActivePointerInProgress)
        );
        let mv = g.pointer_move(&at(2, 200.0, 0.0));
        assert_eq!(
            mv.outcome,
            GestureOutcome::Ignored(GestureIgnoredReason::PointerMismatch)
        );
        let up = g.pointer_up(&at(2, 200.0, 0.0));
        assert_eq!(up.capture, None);
        assert!(g.is_dragging());
    }

    #[test]
    fn up_without_down_is_ignored() {
        let mut g = resolver();
        let d = g.pointer_up(&at(1, 0.0, 0.0));
        assert_eq!(
            d.outcome,
            GestureOutcome::Ignored(GestureIgnoredReason::NoActivePointer)
        );
        assert_eq!(d.capture, None);
    }

    // --- Release policy ---

    #[test]
    fn swipe_right_past_threshold_goes_previous() {
        let mut g = resolver();
        g.pointer_down(&at(1, 100.0, 100.0));
        let mv = g.pointer_move(&at(1, 160.0, 101.0));
        assert_eq!(mv.step, None, "release policy never steps on move");
        let up = g.pointer_up(&at(1, 160.0, 101.0));
        assert_eq!(up.step, Some(Step::Previous));
        assert_eq!(up.capture, Some(CaptureCommand::Release { pointer_id: 1 }));
        assert_eq!(up.outcome, GestureOutcome::DragEnded);
        assert!(!g.is_dragging());
    }

    #[test]
    fn swipe_left_goes_next() {
        let mut g = resolver();
        g.pointer_down(&at(1, 300.0, 100.0));
        let up = g.pointer_up(&at(1, 200.0, 90.0));
        assert_eq!(up.step, Some(Step::Next));
    }

    #[test]
    fn long_swipe_is_still_one_step() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        for x in (10..=900).step_by(10) {
            assert_eq!(g.pointer_move(&at(1, x as f32, 0.0)).step, None);
        }
        assert_eq!(g.pointer_up(&at(1, 900.0, 0.0)).step, Some(Step::Previous));
    }

    #[test]
    fn below_threshold_no_step() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        assert_eq!(g.pointer_up(&at(1, 50.0, 0.0)).step, None, "must exceed, not meet");
    }

    #[test]
    fn vertical_dominant_release_no_step() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        assert_eq!(g.pointer_up(&at(1, 80.0, 120.0)).step, None);
    }

    #[test]
    fn cancel_resolves_like_up() {
        let mut g = resolver();
        g.pointer_down(&at(4, 0.0, 0.0));
        let d = g.pointer_cancel(&at(4, -70.0, 0.0));
        assert_eq!(d.outcome, GestureOutcome::DragCancelled);
        assert_eq!(d.step, Some(Step::Next));
        assert_eq!(d.capture, Some(CaptureCommand::Release { pointer_id: 4 }));
    }

    #[test]
    fn inverted_sign_flips_direction() {
        let mut g = GestureResolver::new(GestureConfig {
            swipe_sign: SwipeSign::Inverted,
            ..GestureConfig::default()
        });
        g.pointer_down(&at(1, 0.0, 0.0));
        assert_eq!(g.pointer_up(&at(1, 60.0, 0.0)).step, Some(Step::Next));
    }

    // --- Move sampling and feedback ---

    #[test]
    fn vertical_sample_leaves_accumulator_alone() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        g.pointer_move(&at(1, 20.0, 0.0));
        assert_eq!(g.accumulator(), 20.0);
        let d = g.pointer_move(&at(1, 22.0, 40.0));
        assert_eq!(
            d.outcome,
            GestureOutcome::Ignored(GestureIgnoredReason::VerticalDominant)
        );
        assert_eq!(g.accumulator(), 20.0);
        g.pointer_move(&at(1, 30.0, 40.0));
        assert_eq!(g.accumulator(), 28.0);
    }

    #[test]
    fn feedback_is_damped_and_clamped() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        let d = g.pointer_move(&at(1, 100.0, 0.0));
        assert!((d.feedback.unwrap() - 18.0).abs() < 1e-4);
        let d = g.pointer_move(&at(1, -1000.0, 0.0));
        assert_eq!(d.feedback, Some(-38.0));
    }

    #[test]
    fn feedback_suppressed_when_net_vertical() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        let d = g.pointer_move(&at(1, 10.0, 50.0));
        assert_eq!(d.feedback, None);
    }

    // --- Continuous policy ---

    #[test]
    fn continuous_steps_each_threshold_and_drops_remainder() {
        let mut g = continuous();
        g.pointer_down(&at(1, 0.0, 0.0));
        assert_eq!(g.pointer_move(&at(1, 40.0, 0.0)).step, None);
        let d = g.pointer_move(&at(1, 60.0, 0.0));
        assert_eq!(d.step, Some(Step::Previous));
        assert_eq!(g.accumulator(), 0.0, "remainder dropped");
        assert_eq!(g.pointer_move(&at(1, 100.0, 0.0)).step, None);
        assert_eq!(g.pointer_move(&at(1, 111.0, 0.0)).step, Some(Step::Previous));
        let up = g.pointer_up(&at(1, 111.0, 0.0));
        assert_eq!(up.step, None, "release adds nothing");
    }

    #[test]
    fn continuous_single_long_sample_is_one_step() {
        let mut g = continuous();
        g.pointer_down(&at(1, 0.0, 0.0));
        assert_eq!(g.pointer_move(&at(1, -500.0, 0.0)).step, Some(Step::Next));
        assert_eq!(g.accumulator(), 0.0);
    }

    // --- Wheel ---

    #[test]
    fn horizontal_wheel_steps_once() {
        let g = resolver();
        assert_eq!(g.wheel(&WheelEvent::new(30.0, 2.0)).step, Some(Step::Next));
        assert_eq!(g.wheel(&WheelEvent::new(-3.0, 0.0)).step, Some(Step::Previous));
    }

    #[test]
    fn vertical_wheel_ignored_by_default() {
        let g = resolver();
        let d = g.wheel(&WheelEvent::new(5.0, 40.0));
        assert!(d.is_ignored());
        assert_eq!(d.step, None);
        assert_eq!(
            g.wheel(&WheelEvent::new(0.0, 0.0)).outcome,
            GestureOutcome::Ignored(GestureIgnoredReason::ZeroDelta)
        );
    }

    #[test]
    fn vertical_axis_configuration() {
        let g = GestureResolver::new(GestureConfig {
            wheel_axis: WheelAxis::Vertical,
            ..GestureConfig::default()
        });
        assert_eq!(g.wheel(&WheelEvent::new(0.0, 12.0)).step, Some(Step::Next));
        assert!(g.wheel(&WheelEvent::new(30.0, 12.0)).is_ignored());
    }

    #[test]
    fn reset_drops_drag() {
        let mut g = resolver();
        g.pointer_down(&at(1, 0.0, 0.0));
        g.reset();
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert_eq!(g.accumulator(), 0.0);
    }
}
