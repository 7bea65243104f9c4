#![forbid(unsafe_code)]

//! The carousel engine.
//!
//! [`CarouselEngine`] owns the only mutable carousel state: the transition
//! controller, the gesture resolver, and the autoplay scheduler. The host
//! drives it with commands, routed [`HostEvent`]s, and [`advance`] calls for
//! timers; the engine answers by writing slot views, drag state, and pointer
//! capture through [`CarouselHost`].
//!
//! # Invariants
//!
//! 1. Every accepted index change re-emits all slot views before returning.
//! 2. Autoplay never steps while a hold is set, a drag is in progress, or a
//!    transition is settling.
//! 3. A pointer-down that starts a drag takes the interaction hold; the
//!    matching up/cancel releases it after the grace delay.
//! 4. Capture errors from the host are logged and swallowed.
//! 5. `next_deadline()` is the minimum of every pending timer; `advance(now)`
//!    fires them in deadline order and always terminates.
//!
//! # Failure Modes
//!
//! - Mounting without a surface or with fewer than two items fails with
//!   [`MountError`]; callers treat that as "no carousel on this page".
//! - Commands while locked, or toward the active index, are dropped and
//!   return `false`.
//!
//! [`advance`]: CarouselEngine::advance

use std::fmt;
use std::time::Duration;

use marquee_core::carousel::{
    CaptureCommand, GestureDispatch, GestureResolver, Ring, SlotConfig, SlotView, Step,
    TransitionController, emit_slots,
};
use marquee_core::event::{
    HostEvent, KeyCode, KeyEvent, Modifiers, PointerEvent, Visibility, WheelEvent,
};
use marquee_core::motion::MotionPreference;
use tracing::{debug, info, trace};

use crate::config::CarouselConfig;
use crate::host::CarouselHost;
use crate::scheduler::{AutoplayScheduler, AutoplayState, PauseHolds};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Why a carousel could not be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountError {
    /// A required surface element is missing.
    MissingSurface(&'static str),
    /// Fewer than two items; nothing to cycle.
    TooFewItems { count: usize },
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSurface(what) => write!(f, "missing {what}"),
            Self::TooFewItems { count } => {
                write!(f, "carousel needs at least 2 items, found {count}")
            }
        }
    }
}

impl std::error::Error for MountError {}

/// Options for an index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOptions {
    /// Restart the autoplay countdown after an accepted change (default: true).
    pub restart_autoplay: bool,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            restart_autoplay: true,
        }
    }
}

impl StepOptions {
    /// Leave the autoplay countdown untouched.
    pub const NO_RESTART: Self = Self {
        restart_autoplay: false,
    };
}

/// What caused an index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepSource {
    /// `next`, `previous`, or `go_to` from the host.
    Command,
    Keyboard,
    /// Threshold crossing during a continuous drag.
    Drag,
    /// Swipe resolved on release.
    Swipe,
    Wheel,
    /// Click on a neighbouring item.
    Click,
    Autoplay,
}

impl StepSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Keyboard => "keyboard",
            Self::Drag => "drag",
            Self::Swipe => "swipe",
            Self::Wheel => "wheel",
            Self::Click => "click",
            Self::Autoplay => "autoplay",
        }
    }
}

/// How the engine treated a routed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Handled; the host should also suppress the browser default action.
    Consumed,
    /// Handled; the default action may proceed.
    Handled,
    /// Not relevant to the carousel.
    Ignored,
}

impl EventOutcome {
    /// Whether the host should call `preventDefault()`.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

// ---------------------------------------------------------------------------
// CarouselEngine
// ---------------------------------------------------------------------------

/// A mounted carousel bound to its host.
#[derive(Debug)]
pub struct CarouselEngine<H: CarouselHost> {
    host: H,
    controller: TransitionController,
    gestures: GestureResolver,
    scheduler: AutoplayScheduler,
    slots: SlotConfig,
    motion: MotionPreference,
    /// A step was committed by the drag in progress.
    drag_stepped: bool,
    /// Swallow the click the browser synthesizes after a committing swipe.
    suppress_click: bool,
}

impl<H: CarouselHost> CarouselEngine<H> {
    /// Discover the carousel through `host` and start it.
    ///
    /// Emits every slot view and, unless reduced motion is requested or the
    /// interval is zero, arms the first autoplay tick.
    ///
    /// `config` is used as given; run [`CarouselConfig::validate`] first (the
    /// facade's `mount` and `mount_or_skip` do).
    pub fn mount(
        mut host: H,
        config: &CarouselConfig,
        motion: MotionPreference,
        now: Duration,
    ) -> Result<Self, MountError> {
        if !host.has_surface() {
            return Err(MountError::MissingSurface("carousel surface"));
        }
        let count = host.item_count();
        let ring = Ring::new(count).ok_or(MountError::TooFewItems { count })?;

        let scheduler = if motion.is_reduced() {
            AutoplayScheduler::disabled()
        } else {
            AutoplayScheduler::new(config.autoplay_interval(), config.resume_delay())
        };
        host.set_drag_state(false, 0.0);

        let mut engine = Self {
            host,
            controller: TransitionController::new(ring, motion.scale(config.transition())),
            gestures: GestureResolver::new(config.to_gesture_config()),
            scheduler,
            slots: config.to_slot_config(),
            motion,
            drag_stepped: false,
            suppress_click: false,
        };
        engine.emit();
        let autoplay = engine.scheduler.start(now);
        info!(
            count,
            reduced_motion = motion.is_reduced(),
            autoplay,
            "carousel mounted"
        );
        Ok(engine)
    }

    // -- Commands ----------------------------------------------------------

    /// Advance one item. Returns whether the index changed.
    pub fn next(&mut self, now: Duration) -> bool {
        self.step(Step::Next, StepOptions::default(), StepSource::Command, now)
    }

    /// Go back one item. Returns whether the index changed.
    pub fn previous(&mut self, now: Duration) -> bool {
        self.step(Step::Previous, StepOptions::default(), StepSource::Command, now)
    }

    /// Go to `index` (any integer; wrapped). Returns whether the index changed.
    pub fn go_to(&mut self, index: i64, now: Duration) -> bool {
        self.go_to_with(index, StepOptions::default(), now)
    }

    /// [`go_to`](Self::go_to) with explicit options.
    pub fn go_to_with(&mut self, index: i64, options: StepOptions, now: Duration) -> bool {
        self.commit(index, options, StepSource::Command, now)
    }

    // -- Events ------------------------------------------------------------

    /// Route one host event.
    pub fn handle(&mut self, event: &HostEvent, now: Duration) -> EventOutcome {
        match event {
            HostEvent::PointerDown(ev) => self.on_pointer_down(ev, now),
            HostEvent::PointerMove(ev) => self.on_pointer_move(ev, now),
            HostEvent::PointerUp(ev) => self.on_pointer_end(ev, false, now),
            HostEvent::PointerCancel(ev) => self.on_pointer_end(ev, true, now),
            HostEvent::PointerEnter => {
                self.hold(PauseHolds::HOVER, now);
                EventOutcome::Handled
            }
            HostEvent::PointerLeave => {
                self.release(PauseHolds::HOVER, now);
                EventOutcome::Handled
            }
            HostEvent::Wheel(ev) => self.on_wheel(ev, now),
            HostEvent::Key(ev) => self.on_key(ev, now),
            HostEvent::FocusIn => {
                self.hold(PauseHolds::FOCUS, now);
                EventOutcome::Handled
            }
            HostEvent::FocusOut { related_inside } => {
                if *related_inside {
                    trace!("carousel focus moved within region");
                    return EventOutcome::Ignored;
                }
                self.release(PauseHolds::FOCUS, now);
                EventOutcome::Handled
            }
            HostEvent::Visibility(Visibility::Hidden) => {
                self.hold(PauseHolds::HIDDEN, now);
                EventOutcome::Handled
            }
            HostEvent::Visibility(Visibility::Visible) => {
                self.release(PauseHolds::HIDDEN, now);
                EventOutcome::Handled
            }
            HostEvent::Resize { .. } => {
                self.host.set_drag_state(self.gestures.is_dragging(), 0.0);
                self.emit();
                EventOutcome::Handled
            }
            HostEvent::ItemClick { index } => self.on_item_click(*index, now),
        }
    }

    // -- Timers ------------------------------------------------------------

    /// Earliest pending timer across unlock, resume, and tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.controller.unlock_deadline(), self.scheduler.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer due at or before `now`, earliest first.
    pub fn advance(&mut self, now: Duration) {
        while let Some(due) = self.next_deadline().filter(|due| *due <= now) {
            if self.controller.unlock_deadline() == Some(due) {
                self.controller.settle(now);
                trace!(active = self.controller.active(), "carousel transition settled");
            } else if self.scheduler.resume_deadline() == Some(due) {
                if self.scheduler.fire_resume(now) {
                    debug!(reason = "grace elapsed", "carousel autoplay started");
                }
            } else if self.scheduler.fire_tick(now) {
                self.on_autoplay_tick(now);
            } else {
                break;
            }
        }
    }

    // -- Queries -----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.controller.active()
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.controller.ring().count()
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// Whether autoplay is held by any pause reason.
    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Net unconsumed horizontal drag displacement in px.
    #[inline]
    #[must_use]
    pub fn drag_accumulator(&self) -> f32 {
        self.gestures.accumulator()
    }

    #[must_use]
    pub fn autoplay_state(&self) -> AutoplayState {
        self.scheduler.state()
    }

    #[inline]
    #[must_use]
    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    /// Current view of every item, in list order.
    #[must_use]
    pub fn slot_views(&self) -> Vec<SlotView> {
        emit_slots(&self.controller.ring(), self.controller.active(), &self.slots)
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Tear down and hand the host back so it can release its listeners.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    // -- Internals ---------------------------------------------------------

    fn emit(&mut self) {
        for (index, view) in self.slot_views().iter().enumerate() {
            self.host.apply_slot(index, view);
        }
    }

    fn step(&mut self, step: Step, options: StepOptions, source: StepSource, now: Duration) -> bool {
        let target = self.controller.active() as i64 + step.signum();
        self.commit(target, options, source, now)
    }

    fn commit(&mut self, target: i64, options: StepOptions, source: StepSource, now: Duration) -> bool {
        match self.controller.go_to(target, now) {
            Ok(transition) => {
                debug!(
                    from = transition.from,
                    to = transition.to,
                    source = source.as_str(),
                    "carousel step committed"
                );
                self.emit();
                if options.restart_autoplay {
                    self.scheduler.restart(now);
                }
                true
            }
            Err(reason) => {
                trace!(
                    requested = target,
                    ?reason,
                    source = source.as_str(),
                    "carousel step ignored"
                );
                false
            }
        }
    }

    fn hold(&mut self, reason: PauseHolds, now: Duration) {
        if self.scheduler.hold(reason, now) {
            debug!(?reason, "carousel autoplay stopped");
        }
    }

    fn release(&mut self, reason: PauseHolds, now: Duration) {
        if self.scheduler.release(reason, now) {
            debug!(?reason, "carousel autoplay started");
        }
    }

    /// Apply capture, feedback, and step from one gesture dispatch.
    /// Returns whether a step was committed.
    fn apply_dispatch(&mut self, dispatch: GestureDispatch, source: StepSource, now: Duration) -> bool {
        match dispatch.capture {
            Some(CaptureCommand::Acquire { pointer_id }) => {
                if let Err(err) = self.host.set_pointer_capture(pointer_id) {
                    trace!(pointer_id, %err, "pointer capture failed");
                }
            }
            Some(CaptureCommand::Release { pointer_id }) => {
                if let Err(err) = self.host.release_pointer_capture(pointer_id) {
                    trace!(pointer_id, %err, "pointer capture release ignored");
                }
            }
            None => {}
        }
        if let Some(offset) = dispatch.feedback {
            self.host.set_drag_state(self.gestures.is_dragging(), offset);
        }
        dispatch
            .step
            .is_some_and(|step| self.step(step, StepOptions::NO_RESTART, source, now))
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, now: Duration) -> EventOutcome {
        let dispatch = self.gestures.pointer_down(event);
        if dispatch.is_ignored() {
            trace!(pointer_id = event.pointer_id, outcome = ?dispatch.outcome, "pointer down ignored");
            return EventOutcome::Ignored;
        }
        self.drag_stepped = false;
        self.suppress_click = false;
        self.hold(PauseHolds::INTERACTION, now);
        self.apply_dispatch(dispatch, StepSource::Drag, now);
        EventOutcome::Handled
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, now: Duration) -> EventOutcome {
        let dispatch = self.gestures.pointer_move(event);
        if dispatch.is_ignored() {
            if let Some(offset) = dispatch.feedback {
                self.host.set_drag_state(true, offset);
            }
            trace!(pointer_id = event.pointer_id, outcome = ?dispatch.outcome, "pointer move ignored");
            return EventOutcome::Ignored;
        }
        if self.apply_dispatch(dispatch, StepSource::Drag, now) {
            self.drag_stepped = true;
        }
        EventOutcome::Handled
    }

    fn on_pointer_end(&mut self, event: &PointerEvent, cancelled: bool, now: Duration) -> EventOutcome {
        let dispatch = if cancelled {
            self.gestures.pointer_cancel(event)
        } else {
            self.gestures.pointer_up(event)
        };
        if dispatch.is_ignored() {
            trace!(pointer_id = event.pointer_id, outcome = ?dispatch.outcome, "pointer end ignored");
            return EventOutcome::Ignored;
        }
        let stepped = self.apply_dispatch(dispatch, StepSource::Swipe, now);
        self.suppress_click = stepped || self.drag_stepped;
        self.drag_stepped = false;
        self.scheduler.release_after(PauseHolds::INTERACTION, now);
        EventOutcome::Handled
    }

    fn on_wheel(&mut self, event: &WheelEvent, now: Duration) -> EventOutcome {
        let dispatch = self.gestures.wheel(event);
        if dispatch.is_ignored() {
            trace!(outcome = ?dispatch.outcome, "wheel ignored");
            return EventOutcome::Ignored;
        }
        // A drag in progress owns the interaction hold and its release.
        let dragging = self.gestures.is_dragging();
        if !dragging {
            self.hold(PauseHolds::INTERACTION, now);
        }
        self.apply_dispatch(dispatch, StepSource::Wheel, now);
        if !dragging {
            self.scheduler.release_after(PauseHolds::INTERACTION, now);
        }
        EventOutcome::Consumed
    }

    fn on_key(&mut self, event: &KeyEvent, now: Duration) -> EventOutcome {
        // Alt/Ctrl/Meta + arrow belong to the browser (history, tab switching).
        if event.modifiers.intersects(Modifiers::ALT | Modifiers::CTRL | Modifiers::META) {
            return EventOutcome::Ignored;
        }
        let step = match event.code {
            KeyCode::ArrowRight => Step::Next,
            KeyCode::ArrowLeft => Step::Previous,
            _ => return EventOutcome::Ignored,
        };
        self.step(step, StepOptions::default(), StepSource::Keyboard, now);
        self.scheduler.restart(now);
        EventOutcome::Consumed
    }

    fn on_item_click(&mut self, index: usize, now: Duration) -> EventOutcome {
        if std::mem::take(&mut self.suppress_click) {
            trace!(index, "item click after swipe suppressed");
            return EventOutcome::Ignored;
        }
        let ring = self.controller.ring();
        if index >= ring.count() {
            trace!(index, count = ring.count(), "item click out of range");
            return EventOutcome::Ignored;
        }
        let delta = ring.circular_delta(index, self.controller.active());
        if SlotView::from_offset(delta, &self.slots).hidden {
            trace!(index, delta, "hidden item click ignored");
            return EventOutcome::Ignored;
        }
        let Some(step) = Step::toward(delta) else {
            return EventOutcome::Ignored;
        };
        self.step(step, StepOptions::default(), StepSource::Click, now);
        EventOutcome::Handled
    }

    fn on_autoplay_tick(&mut self, now: Duration) {
        if self.controller.is_animating() || self.gestures.is_dragging() || self.scheduler.is_paused() {
            trace!(
                animating = self.controller.is_animating(),
                dragging = self.gestures.is_dragging(),
                "autoplay tick skipped"
            );
            return;
        }
        self.step(Step::Next, StepOptions::NO_RESTART, StepSource::Autoplay, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CaptureError;

    #[derive(Debug, Default)]
    struct StubHost {
        surface: bool,
        items: usize,
        applied: usize,
        capture_fails: bool,
    }

    impl CarouselHost for StubHost {
        fn has_surface(&self) -> bool {
            self.surface
        }
        fn item_count(&self) -> usize {
            self.items
        }
        fn apply_slot(&mut self, _index: usize, _view: &SlotView) {
            self.applied += 1;
        }
        fn set_drag_state(&mut self, _dragging: bool, _offset_px: f32) {}
        fn set_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
            if self.capture_fails {
                Err(CaptureError::UnknownPointer(pointer_id))
            } else {
                Ok(())
            }
        }
        fn release_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
            if self.capture_fails {
                Err(CaptureError::AlreadyReleased(pointer_id))
            } else {
                Ok(())
            }
        }
    }

    fn host(items: usize) -> StubHost {
        StubHost {
            surface: true,
            items,
            ..StubHost::default()
        }
    }

    fn mount(items: usize) -> CarouselEngine<StubHost> {
        CarouselEngine::mount(host(items), &CarouselConfig::default(), MotionPreference::Full, Duration::ZERO)
            .unwrap()
    }

    #[test]
    fn mount_requires_surface() {
        let err = CarouselEngine::mount(
            StubHost::default(),
            &CarouselConfig::default(),
            MotionPreference::Full,
            Duration::ZERO,
        )
        .unwrap_err();
        assert_eq!(err, MountError::MissingSurface("carousel surface"));
        assert_eq!(err.to_string(), "missing carousel surface");
    }

    #[test]
    fn mount_requires_two_items() {
        for items in [0, 1] {
            let err = CarouselEngine::mount(
                host(items),
                &CarouselConfig::default(),
                MotionPreference::Full,
                Duration::ZERO,
            )
            .unwrap_err();
            assert_eq!(err, MountError::TooFewItems { count: items });
        }
    }

    #[test]
    fn mount_emits_every_slot() {
        let engine = mount(5);
        assert_eq!(engine.host().applied, 5);
        assert_eq!(engine.active_index(), 0);
        assert_eq!(engine.count(), 5);
    }

    #[test]
    fn capture_errors_are_swallowed() {
        let mut h = host(3);
        h.capture_fails = true;
        let mut engine =
            CarouselEngine::mount(h, &CarouselConfig::default(), MotionPreference::Full, Duration::ZERO).unwrap();
        let down = HostEvent::PointerDown(PointerEvent::mouse(1, 0.0, 0.0));
        let up = HostEvent::PointerUp(PointerEvent::mouse(1, 0.0, 0.0));
        assert_eq!(engine.handle(&down, Duration::ZERO), EventOutcome::Handled);
        assert_eq!(engine.handle(&up, Duration::ZERO), EventOutcome::Handled);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut engine = mount(3);
        let key = HostEvent::Key(KeyEvent::new(KeyCode::Enter));
        assert_eq!(engine.handle(&key, Duration::ZERO), EventOutcome::Ignored);
        assert!(!EventOutcome::Handled.prevents_default());
        assert!(EventOutcome::Consumed.prevents_default());
    }

    #[test]
    fn into_host_hands_back_host() {
        let engine = mount(4);
        let host = engine.into_host();
        assert_eq!(host.items, 4);
    }

    #[test]
    fn step_source_names() {
        assert_eq!(StepSource::Autoplay.as_str(), "autoplay");
        assert_eq!(StepSource::Swipe.as_str(), "swipe");
    }
}
