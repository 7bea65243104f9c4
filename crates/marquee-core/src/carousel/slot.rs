#![forbid(unsafe_code)]

//! Per-item visual attributes.
//!
//! [`SlotView`] is what the host applies to each item after every state
//! change: the signed circular offset, a bounded depth for scale and opacity
//! formulas, stacking order, opacity, and the hidden, interactive, and
//! focusable flags.
//!
//! # Invariants
//!
//! 1. Emission is a pure function of `(ring, active, config)`; emitting twice
//!    with unchanged input yields identical views.
//! 2. Opacity is non-increasing in `|offset|` and is exactly `0.0` for hidden
//!    items.
//! 3. Stacking order is strictly higher for items closer to the active item,
//!    up to the hidden boundary.
//! 4. Only `offset == 0` is focusable; only `|offset| <= 1` is interactive.

use super::ring::Ring;

/// Tunables for visual attribute emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotConfig {
    /// Items further than this from the active item are hidden (default: 3).
    pub max_visible: u32,
    /// Opacity lost per slot of distance (default: 0.16).
    pub opacity_step: f32,
    /// Stacking order of the active item (default: 100).
    pub z_base: i32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            opacity_step: 0.16,
            z_base: 100,
        }
    }
}

/// Visual attributes for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotView {
    /// Signed circular offset from the active item.
    pub offset: i64,
    /// `|offset|`.
    pub distance: u32,
    /// `min(distance, max_visible + 1)`, used for depth, scale, and opacity.
    pub depth: u32,
    /// Stacking order.
    pub z_index: i32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the item is beyond the visible range.
    pub hidden: bool,
    /// Whether the item receives pointer input.
    pub interactive: bool,
    /// Whether the item is reachable with the keyboard.
    pub focusable: bool,
}

impl SlotView {
    /// Derive the view for a signed offset.
    #[must_use]
    pub fn from_offset(offset: i64, config: &SlotConfig) -> Self {
        let distance = u32::try_from(offset.unsigned_abs()).unwrap_or(u32::MAX);
        let depth = distance.min(config.max_visible.saturating_add(1));
        let hidden = distance > config.max_visible;
        let opacity = if hidden {
            0.0
        } else {
            (1.0 - depth as f32 * config.opacity_step).clamp(0.0, 1.0)
        };
        let z_index = config
            .z_base
            .saturating_sub(i32::try_from(depth).unwrap_or(i32::MAX));
        Self {
            offset,
            distance,
            depth,
            z_index,
            opacity,
            hidden,
            interactive: distance <= 1,
            focusable: offset == 0,
        }
    }

    /// Whether this is the active item.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.offset == 0
    }
}

/// Emit views for every item of `ring` given the active index.
#[must_use]
pub fn emit_slots(ring: &Ring, active: usize, config: &SlotConfig) -> Vec<SlotView> {
    ring.deltas(active)
        .map(|(_, delta)| SlotView::from_offset(delta, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn views(count: usize, active: usize) -> Vec<SlotView> {
        emit_slots(&Ring::new(count).unwrap(), active, &SlotConfig::default())
    }

    #[test]
    fn active_slot_attributes() {
        let v = SlotView::from_offset(0, &SlotConfig::default());
        assert_eq!(
            v,
            SlotView {
                offset: 0,
                distance: 0,
                depth: 0,
                z_index: 100,
                opacity: 1.0,
                hidden: false,
                interactive: true,
                focusable: true,
            }
        );
        assert!(v.is_active());
    }

    #[test]
    fn neighbours_are_interactive_but_not_focusable() {
        for offset in [-1, 1] {
            let v = SlotView::from_offset(offset, &SlotConfig::default());
            assert!(v.interactive);
            assert!(!v.focusable);
            assert_eq!(v.z_index, 99);
            assert!((v.opacity - 0.84).abs() < 1e-6);
        }
    }

    #[test]
    fn beyond_max_visible_is_hidden_and_transparent() {
        let v = SlotView::from_offset(-4, &SlotConfig::default());
        assert!(v.hidden);
        assert_eq!(v.opacity, 0.0);
        assert_eq!(v.depth, 4);
        assert_eq!(v.distance, 4);
        assert!(!v.interactive);

        let far = SlotView::from_offset(9, &SlotConfig::default());
        assert_eq!(far.depth, 4, "depth is bounded");
        assert_eq!(far.distance, 9);
    }

    #[test]
    fn opacity_decreases_with_distance() {
        let config = SlotConfig::default();
        let mut prev = f32::INFINITY;
        for d in 0..8 {
            let v = SlotView::from_offset(d, &config);
            assert!(v.opacity <= prev, "opacity rose at distance {d}");
            prev = v.opacity;
        }
    }

    #[test]
    fn exactly_one_active_slot() {
        for active in 0..6 {
            let v = views(6, active);
            assert_eq!(v.iter().filter(|s| s.is_active()).count(), 1);
            assert!(v[active].is_active());
        }
    }

    #[test]
    fn emission_is_idempotent() {
        assert_eq!(views(9, 4), views(9, 4));
    }

    #[test]
    fn seven_items_layout() {
        let offsets: Vec<i64> = views(7, 0).iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, -3, -2, -1]);
        assert!(views(7, 0).iter().all(|s| !s.hidden));
        assert!(views(9, 0)[4].hidden);
    }
}
