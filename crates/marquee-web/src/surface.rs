#![forbid(unsafe_code)]

//! Style-sink rendering adapter.
//!
//! [`StyleSurface`] implements [`CarouselHost`] by turning each emitted
//! [`SlotView`] into the CSS custom properties, classes, and attributes the
//! page stylesheet reads. Writes are diffed against what was last written,
//! so re-emitting unchanged views produces no patches.
//!
//! Per item:
//! - `--slot`, `--slot-abs`, `--z`, `--card-opacity` custom properties,
//! - `is-active` class,
//! - `aria-hidden`, `tabindex`, and `pointer-events`.
//!
//! On the surface: `--drag-offset` and the `is-dragging` class.

use std::collections::HashMap;

use marquee_core::carousel::SlotView;
use marquee_runtime::{CaptureError, CarouselHost};

use crate::pointer_capture::{CaptureOp, PointerCaptureLedger};

/// Element a patch applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    /// The carousel container.
    Surface,
    /// The item at this index.
    Item(usize),
}

impl StyleTarget {
    /// JS-facing item index; the surface is `-1`.
    #[must_use]
    pub fn js_index(self) -> i64 {
        match self {
            Self::Surface => -1,
            Self::Item(i) => i64::try_from(i).unwrap_or(i64::MAX),
        }
    }
}

/// How the host applies a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// `style.setProperty(name, value)`.
    Property,
    /// `setAttribute(name, value)`.
    Attribute,
    /// `classList.toggle(name, value == "true")`.
    Class,
}

impl StyleKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Attribute => "attribute",
            Self::Class => "class",
        }
    }
}

/// One presentation write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePatch {
    pub target: StyleTarget,
    pub kind: StyleKind,
    pub name: &'static str,
    pub value: String,
}

/// Receives presentation writes.
pub trait StyleSink {
    fn write(&mut self, patch: StylePatch);
}

/// Sink that buffers patches until the host drains them.
#[derive(Debug, Default, Clone)]
pub struct PatchBuffer {
    patches: Vec<StylePatch>,
}

impl PatchBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    #[must_use]
    pub fn patches(&self) -> &[StylePatch] {
        &self.patches
    }

    /// Take buffered patches in write order.
    pub fn drain(&mut self) -> Vec<StylePatch> {
        std::mem::take(&mut self.patches)
    }
}

impl StyleSink for PatchBuffer {
    fn write(&mut self, patch: StylePatch) {
        self.patches.push(patch);
    }
}

/// Format a number with at most `decimals` places, trailing zeros trimmed.
///
/// `0.84`, `1`, `-5.4`; negative zero prints as `0`.
#[must_use]
pub fn format_decimal(value: f32, decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let mut s = format!("{value:.decimals$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_owned();
    }
    s
}

type WriteKey = (StyleTarget, StyleKind, &'static str);

/// [`CarouselHost`] that renders slots through a [`StyleSink`].
#[derive(Debug)]
pub struct StyleSurface<S> {
    sink: S,
    item_count: usize,
    has_surface: bool,
    written: HashMap<WriteKey, String>,
    captures: PointerCaptureLedger,
}

impl<S: StyleSink> StyleSurface<S> {
    /// Surface over `item_count` items found in the page.
    pub fn new(sink: S, item_count: usize) -> Self {
        Self {
            sink,
            item_count,
            has_surface: true,
            written: HashMap::new(),
            captures: PointerCaptureLedger::new(),
        }
    }

    /// Host whose container or track is missing; mounting fails.
    pub fn detached(sink: S) -> Self {
        Self {
            has_surface: false,
            ..Self::new(sink, 0)
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn captures(&self) -> &PointerCaptureLedger {
        &self.captures
    }

    pub fn captures_mut(&mut self) -> &mut PointerCaptureLedger {
        &mut self.captures
    }

    /// Take queued pointer-capture commands.
    pub fn drain_captures(&mut self) -> Vec<CaptureOp> {
        self.captures.drain()
    }

    /// Forget every cached value so the next emission rewrites everything
    /// (e.g. after the host re-created its DOM nodes).
    pub fn invalidate(&mut self) {
        self.written.clear();
    }

    fn put(&mut self, target: StyleTarget, kind: StyleKind, name: &'static str, value: String) {
        let key = (target, kind, name);
        if self.written.get(&key) == Some(&value) {
            return;
        }
        self.written.insert(key, value.clone());
        self.sink.write(StylePatch {
            target,
            kind,
            name,
            value,
        });
    }
}

impl<S: StyleSink> CarouselHost for StyleSurface<S> {
    fn has_surface(&self) -> bool {
        self.has_surface
    }

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn apply_slot(&mut self, index: usize, view: &SlotView) {
        if index >= self.item_count {
            tracing::trace!(index, count = self.item_count, "slot write out of range");
            return;
        }
        let target = StyleTarget::Item(index);
        let active = view.is_active();
        self.put(target, StyleKind::Property, "--slot", view.offset.to_string());
        self.put(target, StyleKind::Property, "--slot-abs", view.depth.to_string());
        self.put(target, StyleKind::Property, "--z", view.z_index.to_string());
        self.put(
            target,
            StyleKind::Property,
            "--card-opacity",
            format_decimal(view.opacity, 4),
        );
        self.put(target, StyleKind::Class, "is-active", active.to_string());
        self.put(target, StyleKind::Attribute, "aria-hidden", (!active).to_string());
        let tabindex = if view.focusable { "0" } else { "-1" };
        self.put(target, StyleKind::Attribute, "tabindex", tabindex.to_owned());
        let pointer_events = if view.interactive { "auto" } else { "none" };
        self.put(
            target,
            StyleKind::Property,
            "pointer-events",
            pointer_events.to_owned(),
        );
    }

    fn set_drag_state(&mut self, dragging: bool, offset_px: f32) {
        self.put(
            StyleTarget::Surface,
            StyleKind::Class,
            "is-dragging",
            dragging.to_string(),
        );
        self.put(
            StyleTarget::Surface,
            StyleKind::Property,
            "--drag-offset",
            format!("{}px", format_decimal(offset_px, 2)),
        );
    }

    fn set_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
        self.captures.acquire(pointer_id)
    }

    fn release_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
        self.captures.release(pointer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::carousel::{Ring, SlotConfig, emit_slots};
    use pretty_assertions::assert_eq;

    fn render(surface: &mut StyleSurface<PatchBuffer>, count: usize, active: usize) {
        let ring = Ring::new(count).unwrap();
        for (i, view) in emit_slots(&ring, active, &SlotConfig::default())
            .iter()
            .enumerate()
        {
            surface.apply_slot(i, view);
        }
    }

    fn item_value(patches: &[StylePatch], item: usize, name: &str) -> Option<String> {
        patches
            .iter()
            .rev()
            .find(|p| p.target == StyleTarget::Item(item) && p.name == name)
            .map(|p| p.value.clone())
    }

    #[test]
    fn decimals_are_trimmed() {
        assert_eq!(format_decimal(0.84, 4), "0.84");
        assert_eq!(format_decimal(1.0, 4), "1");
        assert_eq!(format_decimal(0.0, 4), "0");
        assert_eq!(format_decimal(-0.001, 2), "0");
        assert_eq!(format_decimal(-5.4, 2), "-5.4");
        assert_eq!(format_decimal(f32::NAN, 2), "0");
    }

    #[test]
    fn active_item_attributes() {
        let mut surface = StyleSurface::new(PatchBuffer::new(), 5);
        render(&mut surface, 5, 0);
        let patches = surface.sink_mut().drain();
        assert_eq!(patches.len(), 5 * 8);
        assert_eq!(item_value(&patches, 0, "--slot").as_deref(), Some("0"));
        assert_eq!(item_value(&patches, 0, "--z").as_deref(), Some("100"));
        assert_eq!(item_value(&patches, 0, "--card-opacity").as_deref(), Some("1"));
        assert_eq!(item_value(&patches, 0, "is-active").as_deref(), Some("true"));
        assert_eq!(item_value(&patches, 0, "aria-hidden").as_deref(), Some("false"));
        assert_eq!(item_value(&patches, 0, "tabindex").as_deref(), Some("0"));
        assert_eq!(item_value(&patches, 0, "pointer-events").as_deref(), Some("auto"));
    }

    #[test]
    fn neighbour_and_far_item_attributes() {
        let mut surface = StyleSurface::new(PatchBuffer::new(), 5);
        render(&mut surface, 5, 0);
        let patches = surface.sink_mut().drain();
        assert_eq!(item_value(&patches, 4, "--slot").as_deref(), Some("-1"));
        assert_eq!(item_value(&patches, 4, "--card-opacity").as_deref(), Some("0.84"));
        assert_eq!(item_value(&patches, 4, "aria-hidden").as_deref(), Some("true"));
        assert_eq!(item_value(&patches, 4, "tabindex").as_deref(), Some("-1"));
        assert_eq!(item_value(&patches, 2, "--slot-abs").as_deref(), Some("2"));
        assert_eq!(item_value(&patches, 2, "pointer-events").as_deref(), Some("none"));
    }

    #[test]
    fn unchanged_emission_writes_nothing() {
        let mut surface = StyleSurface::new(PatchBuffer::new(), 6);
        render(&mut surface, 6, 2);
        surface.sink_mut().drain();
        render(&mut surface, 6, 2);
        assert!(surface.sink().is_empty());

        surface.invalidate();
        render(&mut surface, 6, 2);
        assert_eq!(surface.sink().len(), 6 * 8);
    }

    #[test]
    fn step_rewrites_only_changed_values() {
        let mut surface = StyleSurface::new(PatchBuffer::new(), 9);
        render(&mut surface, 9, 0);
        surface.sink_mut().drain();
        render(&mut surface, 9, 1);
        let patches = surface.sink_mut().drain();
        assert!(!patches.is_empty());
        // Item 5 stays hidden; only its offset flips sign.
        assert_eq!(item_value(&patches, 5, "--slot").as_deref(), Some("4"));
        assert!(
            !patches
                .iter()
                .any(|p| p.target == StyleTarget::Item(5) && p.name == "--card-opacity")
        );
        assert_eq!(item_value(&patches, 6, "--card-opacity").as_deref(), Some("0"));
        assert_eq!(item_value(&patches, 1, "is-active").as_deref(), Some("true"));
        assert_eq!(item_value(&patches, 0, "is-active").as_deref(), Some("false"));
    }

    #[test]
    fn drag_state_targets_surface() {
        let mut surface = StyleSurface::new(PatchBuffer::new(), 3);
        surface.set_drag_state(true, -5.4);
        surface.set_drag_state(true, -5.4);
        surface.set_drag_state(false, 0.0);
        let patches = surface.sink_mut().drain();
        let values: Vec<(&str, &str)> = patches
            .iter()
            .map(|p| {
                assert_eq!(p.target, StyleTarget::Surface);
                (p.name, p.value.as_str())
            })
            .collect();
        assert_eq!(
            values,
            vec![
                ("is-dragging", "true"),
                ("--drag-offset", "-5.4px"),
                ("is-dragging", "false"),
                ("--drag-offset", "0px"),
            ]
        );
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut surface = StyleSurface::new(PatchBuffer::new(), 2);
        surface.apply_slot(7, &SlotView::from_offset(0, &SlotConfig::default()));
        assert!(surface.sink().is_empty());
    }

    #[test]
    fn capture_calls_route_to_ledger() {
        let mut surface = StyleSurface::new(PatchBuffer::new(), 3);
        surface.set_pointer_capture(2).unwrap();
        surface.captures_mut().lost_capture(2);
        assert_eq!(
            surface.release_pointer_capture(2),
            Err(CaptureError::AlreadyReleased(2))
        );
        assert_eq!(
            surface.drain_captures(),
            vec![CaptureOp::Acquire { pointer_id: 2 }]
        );
    }

    #[test]
    fn detached_surface_has_no_items() {
        let surface = StyleSurface::detached(PatchBuffer::new());
        assert!(!surface.has_surface());
        assert_eq!(surface.item_count(), 0);
        assert_eq!(StyleTarget::Surface.js_index(), -1);
        assert_eq!(StyleTarget::Item(3).js_index(), 3);
    }
}
