#![forbid(unsafe_code)]

//! Highlight the navigation link of the most visible section.

use super::IntersectionEntry;

/// `IntersectionObserver` options used by the host.
pub const SECTION_THRESHOLDS: [f32; 3] = [0.2, 0.45, 0.7];
pub const SECTION_ROOT_MARGIN: &str = "-15% 0px -60% 0px";

/// Tracks which section link carries the `active` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSectionTracker {
    sections: usize,
    active: Option<usize>,
}

impl ActiveSectionTracker {
    #[must_use]
    pub const fn new(sections: usize) -> Self {
        Self {
            sections,
            active: None,
        }
    }

    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, section: usize) -> bool {
        self.active == Some(section)
    }

    /// Apply one observer batch.
    ///
    /// Among intersecting entries the highest ratio wins (first in batch order
    /// on ties). Batches with nothing intersecting keep the current link.
    /// Returns the section now active when the batch picked one.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) -> Option<usize> {
        let mut best: Option<&IntersectionEntry> = None;
        for entry in entries
            .iter()
            .filter(|e| e.is_intersecting && e.target < self.sections)
        {
            if best.is_none_or(|b| entry.intersection_ratio > b.intersection_ratio) {
                best = Some(entry);
            }
        }
        let winner = best?.target;
        self.active = Some(winner);
        Some(winner)
    }
}
