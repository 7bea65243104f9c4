#![forbid(unsafe_code)]

//! Host adapter seam.
//!
//! The engine never reaches into a document. Everything it needs from the
//! page (surface discovery, item count, presentation writes, and pointer
//! capture) goes through [`CarouselHost`], so the same engine runs against a
//! browser adapter, the wasm runner, or a recording host in tests.

use std::fmt;

use marquee_core::carousel::SlotView;

/// Pointer-capture failures reported by a host.
///
/// The engine treats these as non-fatal: it logs and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// The host does not know this pointer id.
    UnknownPointer(u32),
    /// Capture for this pointer was already released.
    AlreadyReleased(u32),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPointer(id) => write!(f, "unknown pointer id {id}"),
            Self::AlreadyReleased(id) => write!(f, "pointer {id} capture already released"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// What the engine needs from its host page.
pub trait CarouselHost {
    /// Whether the carousel surface (container and track) was found.
    fn has_surface(&self) -> bool;

    /// Number of items in the backing list. Fixed for the engine's lifetime.
    fn item_count(&self) -> usize;

    /// Apply the visual attributes of the item at `index`.
    fn apply_slot(&mut self, index: usize, view: &SlotView);

    /// Update the surface drag flag and the live drag offset in px.
    fn set_drag_state(&mut self, dragging: bool, offset_px: f32);

    /// Route pointer `pointer_id` to the surface until released.
    fn set_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError>;

    /// Release a capture taken with [`set_pointer_capture`](Self::set_pointer_capture).
    fn release_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError>;
}

impl<H: CarouselHost + ?Sized> CarouselHost for Box<H> {
    fn has_surface(&self) -> bool {
        (**self).has_surface()
    }

    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn apply_slot(&mut self, index: usize, view: &SlotView) {
        (**self).apply_slot(index, view);
    }

    fn set_drag_state(&mut self, dragging: bool, offset_px: f32) {
        (**self).set_drag_state(dragging, offset_px);
    }

    fn set_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
        (**self).set_pointer_capture(pointer_id)
    }

    fn release_pointer_capture(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
        (**self).release_pointer_capture(pointer_id)
    }
}
