#![forbid(unsafe_code)]

//! Circular index arithmetic.
//!
//! # Invariants
//!
//! 1. `count >= 2` for every constructed [`Ring`].
//! 2. `wrap(n)` is in `[0, count)` and `wrap(n) == wrap(n + count)`.
//! 3. `circular_delta(i, active)` is in `(-count/2, count/2]`; for even
//!    counts the opposite item sits at `+count/2`.
//! 4. For any `active`, exactly one `i` has `circular_delta(i, active) == 0`.

/// A fixed-size circular index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ring {
    count: usize,
}

impl Ring {
    /// Smallest item count that can cycle.
    pub const MIN_COUNT: usize = 2;

    /// Create a ring over `count` items. Returns `None` below [`Ring::MIN_COUNT`].
    #[must_use]
    pub const fn new(count: usize) -> Option<Self> {
        if count < Self::MIN_COUNT {
            None
        } else {
            Some(Self { count })
        }
    }

    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Normalize any integer into `[0, count)`.
    #[inline]
    #[must_use]
    pub fn wrap(&self, n: i64) -> usize {
        // usize -> i128 is lossless and keeps rem_euclid free of overflow.
        let count = self.count as i128;
        i128::from(n).rem_euclid(count) as usize
    }

    /// Signed minimal distance from `active` to `index`, wrapping at the ends.
    #[must_use]
    pub fn circular_delta(&self, index: usize, active: usize) -> i64 {
        let count = self.count as i64;
        let forward = (index % self.count) as i64 - (active % self.count) as i64;
        let forward = forward.rem_euclid(count);
        if forward * 2 > count {
            forward - count
        } else {
            forward
        }
    }

    /// Iterate `(index, delta)` pairs for every item.
    pub fn deltas(&self, active: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        (0..self.count).map(move |i| (i, self.circular_delta(i, active)))
    }
}
