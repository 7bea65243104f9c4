#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The page routes DOM input into these types before handing it to the
//! engine. All events derive `Clone` and `PartialEq` for use in tests and
//! pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are CSS pixels in the viewport (`clientX`/`clientY`).
//! - `PointerButton` follows `PointerEvent.button` numbering.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical host event delivered to the carousel engine.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// `pointerdown` on the carousel surface.
    PointerDown(PointerEvent),
    /// `pointermove` on the carousel surface.
    PointerMove(PointerEvent),
    /// `pointerup` on the carousel surface.
    PointerUp(PointerEvent),
    /// `pointercancel` on the carousel surface.
    PointerCancel(PointerEvent),
    /// Pointer entered the carousel surface (`mouseenter`).
    PointerEnter,
    /// Pointer left the carousel surface (`mouseleave`).
    PointerLeave,
    /// A wheel event over the carousel surface.
    Wheel(WheelEvent),
    /// A key press while the carousel region has focus.
    Key(KeyEvent),
    /// Focus moved into the carousel region (`focusin`).
    FocusIn,
    /// Focus left an element of the carousel region (`focusout`).
    FocusOut {
        /// Whether the element receiving focus is still inside the carousel.
        related_inside: bool,
    },
    /// Page visibility changed (`visibilitychange`).
    Visibility(Visibility),
    /// The viewport was resized.
    Resize {
        /// New viewport width in CSS pixels.
        width: f32,
        /// New viewport height in CSS pixels.
        height: f32,
    },
    /// An item was clicked.
    ItemClick {
        /// Position of the item in the backing list.
        index: usize,
    },
}

/// Kind of input device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Button reported by a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, touch contact, or pen tip.
    Primary,
    /// Middle (wheel) button.
    Middle,
    /// Right mouse button or pen barrel button.
    Secondary,
    /// Any other button (back, forward, eraser).
    Other(u8),
}

impl PointerButton {
    /// Map a DOM `PointerEvent.button` value.
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other if other > 0 && other <= u8::MAX as i16 => Self::Other(other as u8),
            _ => Self::Primary,
        }
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Browser-assigned pointer id.
    pub pointer_id: u32,
    /// Device kind.
    pub kind: PointerKind,
    /// Button that changed state (for moves, the primary button).
    pub button: PointerButton,
    /// Viewport position.
    pub position: Point,
}

impl PointerEvent {
    /// Create a primary-button mouse pointer event.
    #[must_use]
    pub const fn mouse(pointer_id: u32, x: f32, y: f32) -> Self {
        Self {
            pointer_id,
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
            position: Point::new(x, y),
        }
    }

    /// Create a touch contact event.
    #[must_use]
    pub const fn touch(pointer_id: u32, x: f32, y: f32) -> Self {
        Self {
            pointer_id,
            kind: PointerKind::Touch,
            button: PointerButton::Primary,
            position: Point::new(x, y),
        }
    }

    /// Replace the button (builder style).
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// A wheel event in pixel deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    /// Horizontal delta (`deltaX`).
    pub dx: f32,
    /// Vertical delta (`deltaY`).
    pub dy: f32,
}

impl WheelEvent {
    /// Create a wheel event.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// Page visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Key codes the page cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Tab,
    /// A printable character.
    Char(char),
    /// Anything else.
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Meta/Command key.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_button_mapping() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(1), PointerButton::Middle);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom(3), PointerButton::Other(3));
        // Moves report -1 in the DOM.
        assert_eq!(PointerButton::from_dom(-1), PointerButton::Primary);
    }

    #[test]
    fn dom_key_mapping() {
        assert_eq!(KeyCode::from_dom_key("ArrowRight"), KeyCode::ArrowRight);
        assert_eq!(KeyCode::from_dom_key("Left"), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from_dom_key("Esc"), KeyCode::Escape);
        assert_eq!(KeyCode::from_dom_key("k"), KeyCode::Char('k'));
        assert_eq!(KeyCode::from_dom_key("PageDown"), KeyCode::Other);
    }

    #[test]
    fn builders() {
        let ev = PointerEvent::mouse(7, 1.0, 2.0).with_button(PointerButton::Secondary);
        assert_eq!(ev.pointer_id, 7);
        assert_eq!(ev.button, PointerButton::Secondary);
        assert_eq!(ev.position, Point::new(1.0, 2.0));

        let key = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(key.modifiers.contains(Modifiers::CTRL));
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
