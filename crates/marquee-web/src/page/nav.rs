#![forbid(unsafe_code)]

//! Mobile navigation menu.

use marquee_core::event::KeyCode;

/// Viewport width at or below which the navigation collapses into a menu.
pub const COLLAPSE_BREAKPOINT_PX: f32 = 900.0;

/// Input routed to the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavInput {
    /// The menu toggle button was clicked.
    ToggleClick,
    /// A link inside the menu was clicked.
    LinkClick { viewport_width: f32 },
    /// A click anywhere in the document. `inside` is true when the target is
    /// within the menu or its toggle.
    DocumentClick { inside: bool },
    Key(KeyCode),
    Resize { viewport_width: f32 },
}

/// Open/closed state of the collapsible navigation.
///
/// The host mirrors [`is_open`](Self::is_open) into the menu's `open` class and
/// [`aria_expanded`](Self::aria_expanded) into the toggle's `aria-expanded`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Apply one input. Returns whether the open state changed.
    pub fn handle(&mut self, input: NavInput) -> bool {
        let open = match input {
            NavInput::ToggleClick => !self.open,
            NavInput::LinkClick { viewport_width } if viewport_width <= COLLAPSE_BREAKPOINT_PX => {
                false
            }
            NavInput::DocumentClick { inside: false } => false,
            NavInput::Key(KeyCode::Escape) => false,
            NavInput::Resize { viewport_width } if viewport_width > COLLAPSE_BREAKPOINT_PX => {
                false
            }
            _ => self.open,
        };
        let changed = open != self.open;
        self.open = open;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> NavMenu {
        let mut nav = NavMenu::new();
        assert!(nav.handle(NavInput::ToggleClick));
        nav
    }

    #[test]
    fn toggle_flips_and_mirrors_aria() {
        let mut nav = NavMenu::new();
        assert_eq!(nav.aria_expanded(), "false");
        nav.handle(NavInput::ToggleClick);
        assert!(nav.is_open());
        assert_eq!(nav.aria_expanded(), "true");
        nav.handle(NavInput::ToggleClick);
        assert!(!nav.is_open());
    }

    #[test]
    fn link_click_closes_only_on_narrow_viewports() {
        let mut nav = opened();
        assert!(!nav.handle(NavInput::LinkClick {
            viewport_width: 1200.0
        }));
        assert!(nav.is_open());
        assert!(nav.handle(NavInput::LinkClick {
            viewport_width: 900.0
        }));
        assert!(!nav.is_open());
    }

    #[test]
    fn outside_click_and_escape_close() {
        let mut nav = opened();
        assert!(!nav.handle(NavInput::DocumentClick { inside: true }));
        assert!(nav.handle(NavInput::DocumentClick { inside: false }));

        let mut nav = opened();
        assert!(!nav.handle(NavInput::Key(KeyCode::Enter)));
        assert!(nav.handle(NavInput::Key(KeyCode::Escape)));
    }

    #[test]
    fn widening_past_breakpoint_closes() {
        let mut nav = opened();
        assert!(!nav.handle(NavInput::Resize {
            viewport_width: 640.0
        }));
        assert!(nav.handle(NavInput::Resize {
            viewport_width: 901.0
        }));
    }

    #[test]
    fn closed_menu_ignores_close_inputs() {
        let mut nav = NavMenu::new();
        assert!(!nav.handle(NavInput::Key(KeyCode::Escape)));
        assert!(!nav.handle(NavInput::DocumentClick { inside: false }));
        assert!(!nav.is_open());
    }
}
