#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use marquee_core::carousel::{DragPolicy, SlotView};
use marquee_core::event::{
    HostEvent, KeyCode, KeyEvent, PointerButton, PointerEvent, PointerKind, Visibility, WheelEvent,
};
use marquee_core::motion::MotionPreference;
use marquee_runtime::{CaptureError, CarouselConfig, CarouselEngine, CarouselHost};

#[derive(Debug, Arbitrary)]
enum Op {
    Down { id: u8, touch: bool, button: u8, x: i16, y: i16 },
    Move { id: u8, x: i16, y: i16 },
    Up { id: u8, x: i16, y: i16 },
    Cancel { id: u8, x: i16, y: i16 },
    Enter,
    Leave,
    Wheel { dx: i16, dy: i16 },
    Key { right: bool },
    FocusIn,
    FocusOut { inside: bool },
    Hidden(bool),
    Resize,
    Click(u8),
    Next,
    Previous,
    GoTo(i16),
    Wait(u16),
    /// Jump the clock to its limit.
    Exhaust,
}

#[derive(Debug, Arbitrary)]
struct Input {
    count: u8,
    reduced: bool,
    continuous: bool,
    ops: Vec<Op>,
}

/// Records the last view written per item so invariants can be checked
/// against what a page would actually show.
struct Recorder {
    views: Vec<Option<SlotView>>,
    captured: Option<u32>,
}

impl CarouselHost for Recorder {
    fn has_surface(&self) -> bool {
        true
    }
    fn item_count(&self) -> usize {
        self.views.len()
    }
    fn apply_slot(&mut self, index: usize, view: &SlotView) {
        self.views[index] = Some(*view);
    }
    fn set_drag_state(&mut self, _: bool, offset_px: f32) {
        assert!(offset_px.abs() <= 38.0 + f32::EPSILON, "drag feedback exceeds limit");
    }
    fn set_pointer_capture(&mut self, id: u32) -> Result<(), CaptureError> {
        self.captured = Some(id);
        Ok(())
    }
    fn release_pointer_capture(&mut self, id: u32) -> Result<(), CaptureError> {
        match self.captured.take() {
            Some(held) if held == id => Ok(()),
            _ => Err(CaptureError::UnknownPointer(id)),
        }
    }
}

fn pointer(id: u8, x: i16, y: i16) -> PointerEvent {
    PointerEvent::mouse(u32::from(id % 4), f32::from(x), f32::from(y))
}

fuzz_target!(|input: Input| {
    let count = usize::from(input.count % 24) + 2;
    let config = CarouselConfig {
        drag_policy: if input.continuous {
            DragPolicy::Continuous
        } else {
            DragPolicy::Release
        },
        ..CarouselConfig::default()
    };
    let host = Recorder {
        views: vec![None; count],
        captured: None,
    };
    let motion = MotionPreference::from_reduced_flag(input.reduced);
    let Ok(mut engine) = CarouselEngine::mount(host, &config, motion, Duration::ZERO) else {
        return;
    };

    let mut now = Duration::ZERO;
    for op in input.ops.into_iter().take(512) {
        let event = match op {
            Op::Down { id, touch, button, x, y } => {
                let mut ev = pointer(id, x, y).with_button(PointerButton::from_dom(i16::from(button % 4)));
                if touch {
                    ev.kind = PointerKind::Touch;
                }
                Some(HostEvent::PointerDown(ev))
            }
            Op::Move { id, x, y } => Some(HostEvent::PointerMove(pointer(id, x, y))),
            Op::Up { id, x, y } => Some(HostEvent::PointerUp(pointer(id, x, y))),
            Op::Cancel { id, x, y } => Some(HostEvent::PointerCancel(pointer(id, x, y))),
            Op::Enter => Some(HostEvent::PointerEnter),
            Op::Leave => Some(HostEvent::PointerLeave),
            Op::Wheel { dx, dy } => Some(HostEvent::Wheel(WheelEvent::new(f32::from(dx), f32::from(dy)))),
            Op::Key { right } => Some(HostEvent::Key(KeyEvent::new(if right {
                KeyCode::ArrowRight
            } else {
                KeyCode::ArrowLeft
            }))),
            Op::FocusIn => Some(HostEvent::FocusIn),
            Op::FocusOut { inside } => Some(HostEvent::FocusOut { related_inside: inside }),
            Op::Hidden(hidden) => Some(HostEvent::Visibility(if hidden {
                Visibility::Hidden
            } else {
                Visibility::Visible
            })),
            Op::Resize => Some(HostEvent::Resize { width: 1024.0, height: 768.0 }),
            Op::Click(i) => Some(HostEvent::ItemClick { index: usize::from(i) }),
            Op::Next => {
                engine.next(now);
                None
            }
            Op::Previous => {
                engine.previous(now);
                None
            }
            Op::GoTo(i) => {
                engine.go_to(i64::from(i), now);
                None
            }
            Op::Wait(ms) => {
                now = now.saturating_add(Duration::from_millis(u64::from(ms)));
                engine.advance(now);
                None
            }
            Op::Exhaust => {
                now = Duration::MAX;
                engine.advance(now);
                None
            }
        };
        if let Some(event) = event {
            engine.handle(&event, now);
        }

        // Deadlines are never in the past after advancing.
        engine.advance(now);
        if let Some(due) = engine.next_deadline() {
            assert!(due > now, "stale deadline {due:?} at {now:?}");
        }

        let active = engine.active_index();
        assert!(active < count);
        let views = &engine.host().views;
        let active_views: Vec<usize> = views
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some_and(|v| v.is_active()))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active_views, vec![active], "exactly one active item");
        for view in views.iter().flatten() {
            assert!((0.0..=1.0).contains(&view.opacity));
            assert!(view.offset.unsigned_abs() as usize <= count / 2);
        }
    }
});
