#![forbid(unsafe_code)]

//! Platform-independent runner logic.
//!
//! [`RunnerCore`] owns a [`CarouselEngine`] over a buffered [`StyleSurface`]
//! and a [`DeterministicClock`] the host sets from `performance.now()`. It is
//! compiled natively for tests and wrapped by the `wasm` module for JS.

use marquee_core::event::{HostEvent, PointerEvent};
use marquee_core::motion::MotionPreference;
use marquee_runtime::{CarouselConfig, CarouselEngine, EventOutcome, StepOptions};
use marquee_web::input_parser::parse_encoded_input;
use marquee_web::{
    CaptureOp, DeterministicClock, HostClock, PatchBuffer, StylePatch, StyleSurface,
    duration_from_ms, duration_to_ms,
};

type Engine = CarouselEngine<StyleSurface<PatchBuffer>>;

/// Result of routing one encoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Outcome(EventOutcome),
    /// Malformed or unsupported input, or no mounted carousel.
    Rejected,
}

impl InputResult {
    /// Stable label for JS.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outcome(EventOutcome::Consumed) => "consumed",
            Self::Outcome(EventOutcome::Handled) => "handled",
            Self::Outcome(EventOutcome::Ignored) => "ignored",
            Self::Rejected => "rejected",
        }
    }
}

/// Carousel runner state shared by the wasm wrapper and native tests.
pub struct RunnerCore {
    engine: Option<Engine>,
    clock: DeterministicClock,
    mount_error: Option<String>,
}

impl RunnerCore {
    /// Mount over `item_count` items.
    ///
    /// `config_json` overrides defaults when present. A bad config, or a
    /// page without enough items, leaves the runner unmounted; every method
    /// then becomes a no-op and [`mount_error`](Self::mount_error) says why.
    pub fn new(
        item_count: u32,
        reduced_motion: bool,
        config_json: Option<&str>,
        now_ms: f64,
    ) -> Self {
        let mut clock = DeterministicClock::new();
        clock.set(duration_from_ms(now_ms));

        let config = match config_json {
            Some(json) => CarouselConfig::from_json_str(json).and_then(CarouselConfig::validated),
            None => Ok(CarouselConfig::default()),
        };
        let config = match config {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(%err, "carousel config rejected");
                return Self {
                    engine: None,
                    clock,
                    mount_error: Some(err.to_string()),
                };
            }
        };

        let surface = StyleSurface::new(PatchBuffer::new(), item_count as usize);
        let motion = MotionPreference::from_reduced_flag(reduced_motion);
        match CarouselEngine::mount(surface, &config, motion, clock.now()) {
            Ok(engine) => Self {
                engine: Some(engine),
                clock,
                mount_error: None,
            },
            Err(err) => {
                tracing::debug!(%err, "carousel mount skipped");
                Self {
                    engine: None,
                    clock,
                    mount_error: Some(err.to_string()),
                }
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn mount_error(&self) -> Option<&str> {
        self.mount_error.as_deref()
    }

    /// Move the clock to `now_ms`; noisy or backwards values are clamped.
    pub fn set_time_ms(&mut self, now_ms: f64) {
        self.clock.set(duration_from_ms(now_ms));
    }

    /// Current clock reading in milliseconds.
    pub fn now_ms(&self) -> f64 {
        duration_to_ms(self.clock.now())
    }

    /// Parse a JSON-encoded DOM event and route it.
    pub fn push_encoded_input(&mut self, json: &str, now_ms: f64) -> InputResult {
        let event = match parse_encoded_input(json) {
            Ok(event) => event,
            Err(err) => {
                tracing::trace!(%err, "encoded input rejected");
                return InputResult::Rejected;
            }
        };
        self.handle(&event, now_ms)
    }

    pub fn handle(&mut self, event: &HostEvent, now_ms: f64) -> InputResult {
        self.set_time_ms(now_ms);
        let now = self.clock.now();
        match self.engine.as_mut() {
            Some(engine) => InputResult::Outcome(engine.handle(event, now)),
            None => InputResult::Rejected,
        }
    }

    /// `gotpointercapture`.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> bool {
        self.engine
            .as_mut()
            .is_some_and(|e| e.host_mut().captures_mut().acknowledge(pointer_id))
    }

    /// `lostpointercapture`. An interrupted drag is cancelled at `(x, y)`.
    pub fn capture_lost(&mut self, pointer_id: u32, x: f32, y: f32, now_ms: f64) -> bool {
        let lost = self
            .engine
            .as_mut()
            .is_some_and(|e| e.host_mut().captures_mut().lost_capture(pointer_id));
        if lost {
            let pointer = PointerEvent::mouse(pointer_id, x, y);
            self.handle(&HostEvent::PointerCancel(pointer), now_ms);
        }
        lost
    }

    pub fn next(&mut self, now_ms: f64) -> bool {
        self.set_time_ms(now_ms);
        let now = self.clock.now();
        self.engine.as_mut().is_some_and(|e| e.next(now))
    }

    pub fn previous(&mut self, now_ms: f64) -> bool {
        self.set_time_ms(now_ms);
        let now = self.clock.now();
        self.engine.as_mut().is_some_and(|e| e.previous(now))
    }

    pub fn go_to(&mut self, index: i64, restart_autoplay: bool, now_ms: f64) -> bool {
        self.set_time_ms(now_ms);
        let now = self.clock.now();
        let options = StepOptions { restart_autoplay };
        self.engine
            .as_mut()
            .is_some_and(|e| e.go_to_with(index, options, now))
    }

    /// Fire due timers.
    pub fn advance(&mut self, now_ms: f64) {
        self.set_time_ms(now_ms);
        let now = self.clock.now();
        if let Some(engine) = self.engine.as_mut() {
            engine.advance(now);
        }
    }

    /// When the host should call [`advance`](Self::advance) next.
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.engine
            .as_ref()
            .and_then(Engine::next_deadline)
            .map(duration_to_ms)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.engine.as_ref().map(Engine::active_index)
    }

    /// Take buffered style writes.
    pub fn drain_patches(&mut self) -> Vec<StylePatch> {
        self.engine
            .as_mut()
            .map(|e| e.host_mut().sink_mut().drain())
            .unwrap_or_default()
    }

    /// Take queued pointer-capture commands.
    pub fn drain_captures(&mut self) -> Vec<CaptureOp> {
        self.engine
            .as_mut()
            .map(|e| e.host_mut().drain_captures())
            .unwrap_or_default()
    }

    /// Observable state as a JSON object string.
    pub fn snapshot_json(&self) -> String {
        let value = match self.engine.as_ref() {
            Some(e) => serde_json::json!({
                "mounted": true,
                "active": e.active_index(),
                "count": e.count(),
                "animating": e.is_animating(),
                "paused": e.is_paused(),
                "dragging": e.is_dragging(),
                "reducedMotion": e.motion().is_reduced(),
                "nextDeadlineMs": self.next_deadline_ms(),
            }),
            None => serde_json::json!({
                "mounted": false,
                "error": self.mount_error,
            }),
        };
        value.to_string()
    }

    /// Tear down. Returns the final capture commands, including releases
    /// for pointers still held, so the host can flush them before removing
    /// its listeners.
    pub fn destroy(&mut self) -> Vec<CaptureOp> {
        let Some(engine) = self.engine.take() else {
            return Vec::new();
        };
        let mut surface = engine.into_host();
        surface.captures_mut().release_all();
        surface.drain_captures()
    }
}
