#![forbid(unsafe_code)]

//! Platform-independent page helper state.
//!
//! [`PageCore`] bundles the page helpers from `marquee_web::page` behind one
//! owner so a browser host can drive them through the `wasm` module. Observer
//! batches arrive as JSON arrays of
//! `{"target", "isIntersecting", "intersectionRatio"}` objects.

use marquee_core::event::KeyCode;
use marquee_core::geometry::{Point, Rect};
use marquee_core::motion::MotionPreference;
use marquee_web::page::IntersectionEntry;
use marquee_web::page::hero::HeroParallax;
use marquee_web::page::nav::{NavInput, NavMenu};
use marquee_web::page::reveal::{RevealTracker, reveal_delay_css};
use marquee_web::page::sections::ActiveSectionTracker;
use marquee_web::page::tilt::{Tilt, TiltCard};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    target: usize,
    #[serde(default)]
    is_intersecting: bool,
    #[serde(default)]
    intersection_ratio: f32,
}

fn parse_entries(json: &str) -> Result<Vec<IntersectionEntry>, serde_json::Error> {
    let raw: Vec<RawEntry> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|e| IntersectionEntry::new(e.target, e.is_intersecting, e.intersection_ratio))
        .collect())
}

/// Page helper state shared by the wasm wrapper and native tests.
#[derive(Debug, Clone)]
pub struct PageCore {
    nav: NavMenu,
    reveal: RevealTracker,
    sections: ActiveSectionTracker,
    tilt: Vec<TiltCard>,
    hero: HeroParallax,
}

impl PageCore {
    pub fn new(
        reduced_motion: bool,
        reveal_count: u32,
        intersection_supported: bool,
        section_count: u32,
        tilt_cards: u32,
    ) -> Self {
        let motion = MotionPreference::from_reduced_flag(reduced_motion);
        Self {
            nav: NavMenu::new(),
            reveal: RevealTracker::new(reveal_count as usize, motion, intersection_supported),
            sections: ActiveSectionTracker::new(section_count as usize),
            tilt: vec![TiltCard::new(motion); tilt_cards as usize],
            hero: HeroParallax::new(motion),
        }
    }

    // -- Navigation --------------------------------------------------------

    /// Apply a nav input. Returns whether the menu opened or closed.
    pub fn nav_input(&mut self, input: NavInput) -> bool {
        self.nav.handle(input)
    }

    /// `keydown` with a DOM `key` value.
    pub fn nav_key(&mut self, key: &str) -> bool {
        self.nav.handle(NavInput::Key(KeyCode::from_dom_key(key)))
    }

    pub fn nav_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn nav_aria_expanded(&self) -> &'static str {
        self.nav.aria_expanded()
    }

    // -- Reveal ------------------------------------------------------------

    pub fn reveal_observing(&self) -> bool {
        self.reveal.is_observing()
    }

    pub fn reveal_delay_css(index: u32) -> String {
        reveal_delay_css(index as usize)
    }

    /// Elements already revealed, for hosts that reveal everything up front.
    pub fn revealed(&self, count: u32) -> Vec<u32> {
        (0..count)
            .filter(|i| self.reveal.is_revealed(*i as usize))
            .collect()
    }

    /// Apply one reveal observer batch; returns newly revealed indices.
    pub fn observe_reveal(&mut self, json: &str) -> Result<Vec<u32>, serde_json::Error> {
        let entries = parse_entries(json)?;
        Ok(self
            .reveal
            .observe(&entries)
            .into_iter()
            .filter_map(|i| u32::try_from(i).ok())
            .collect())
    }

    // -- Active section ----------------------------------------------------

    /// Apply one section observer batch; returns the section now active.
    pub fn observe_sections(&mut self, json: &str) -> Result<Option<u32>, serde_json::Error> {
        let entries = parse_entries(json)?;
        Ok(self
            .sections
            .observe(&entries)
            .and_then(|i| u32::try_from(i).ok()))
    }

    pub fn active_section(&self) -> Option<u32> {
        self.sections.active().and_then(|i| u32::try_from(i).ok())
    }

    // -- Tilt --------------------------------------------------------------

    /// `pointermove` over card `card`. Returns `true` when the host must
    /// request a frame.
    pub fn tilt_move(&mut self, card: u32, x: f32, y: f32) -> bool {
        self.tilt
            .get_mut(card as usize)
            .is_some_and(|c| c.pointer_move(Point::new(x, y)))
    }

    /// Frame fired for `card`, laid out at `rect`.
    pub fn tilt_frame(&mut self, card: u32, rect: Rect) -> Option<Tilt> {
        self.tilt.get_mut(card as usize)?.frame(&rect)
    }

    pub fn tilt_reset(&mut self, card: u32) -> Option<Tilt> {
        self.tilt.get_mut(card as usize)?.reset()
    }

    // -- Hero --------------------------------------------------------------

    pub fn hero_initial(&self) -> Option<String> {
        self.hero.initial_value()
    }

    pub fn hero_request(&mut self) -> bool {
        self.hero.request_update()
    }

    pub fn hero_frame(&mut self, viewport_height: f32, hero_top: f32, hero_height: f32) -> Option<String> {
        self.hero.frame(viewport_height, hero_top, hero_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page() -> PageCore {
        PageCore::new(false, 3, true, 4, 2)
    }

    #[test]
    fn nav_routes_inputs() {
        let mut core = page();
        assert!(core.nav_input(NavInput::ToggleClick));
        assert_eq!(core.nav_aria_expanded(), "true");
        assert!(core.nav_key("Escape"));
        assert!(!core.nav_open());
    }

    #[test]
    fn reveal_batches_decode_from_json() {
        let mut core = page();
        assert!(core.reveal_observing());
        let newly = core
            .observe_reveal(
                r#"[{"target":2,"isIntersecting":true,"intersectionRatio":0.3},
                    {"target":0,"isIntersecting":false}]"#,
            )
            .unwrap();
        assert_eq!(newly, vec![2]);
        assert_eq!(core.revealed(3), vec![2]);
        assert!(core.observe_reveal("{").is_err());
        assert_eq!(PageCore::reveal_delay_css(2), "120ms");
    }

    #[test]
    fn reduced_motion_reveals_everything_up_front() {
        let core = PageCore::new(true, 3, true, 0, 1);
        assert!(!core.reveal_observing());
        assert_eq!(core.revealed(3), vec![0, 1, 2]);
        assert_eq!(core.hero_initial().as_deref(), Some("0"));
    }

    #[test]
    fn sections_pick_highest_ratio() {
        let mut core = page();
        let active = core
            .observe_sections(
                r#"[{"target":1,"isIntersecting":true,"intersectionRatio":0.2},
                    {"target":3,"isIntersecting":true,"intersectionRatio":0.7}]"#,
            )
            .unwrap();
        assert_eq!(active, Some(3));
        assert_eq!(core.observe_sections("[]").unwrap(), None);
        assert_eq!(core.active_section(), Some(3));
    }

    #[test]
    fn tilt_coalesces_per_card() {
        let mut core = page();
        assert!(core.tilt_move(0, 10.0, 10.0));
        assert!(!core.tilt_move(0, 100.0, 50.0), "frame already pending");
        assert!(!core.tilt_move(9, 0.0, 0.0), "unknown card");
        let tilt = core.tilt_frame(0, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
        assert_eq!(tilt, Tilt::FLAT, "latest position wins: card centre");
        assert_eq!(core.tilt_frame(0, Rect::new(0.0, 0.0, 200.0, 100.0)), None);
        assert_eq!(core.tilt_reset(1), Some(Tilt::FLAT));
    }

    #[test]
    fn hero_frames_are_coalesced() {
        let mut core = page();
        assert_eq!(core.hero_initial(), None);
        assert!(core.hero_request());
        assert!(!core.hero_request());
        assert_eq!(core.hero_frame(800.0, 800.0, 600.0).as_deref(), Some("0.0000"));
        assert_eq!(core.hero_frame(800.0, 0.0, 600.0), None);
    }
}
