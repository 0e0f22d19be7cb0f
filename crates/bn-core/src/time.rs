//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter denominated in logical
//! milliseconds.  Nothing in the engine ever reads a wall clock: durations
//! (window length, transit time) and instants (arrival, enqueue, departure)
//! are all plain tick arithmetic, so every run is exact, reproducible, and
//! completes as fast as the event loop can drain its queue.
//!
//! The `time_scale` configuration knob compresses or expands the simulated
//! clock at construction time (see [`RunConfig`][crate::RunConfig]); the
//! statistics divide it back out, so the reported averages are always in
//! real milliseconds regardless of scale.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation instant, in logical milliseconds.
///
/// Stored as `u64`: at millisecond resolution a u64 lasts ~585 million
/// years, far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Tick {
        Tick(self.0 + ms)
    }

    /// Milliseconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, or `None` if `earlier`
    /// is in the future.  Used where underflow indicates a broken invariant
    /// that must surface as an error rather than a panic.
    #[inline]
    pub fn checked_since(self, earlier: Tick) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}ms", self.0)
    }
}
