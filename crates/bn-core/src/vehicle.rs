//! Vehicle identity and lifecycle bookkeeping.
//!
//! A `Vehicle` moves through four states: created (by the generator, with a
//! fixed direction and arrival time), queued (`queued_at` stamped once when
//! it enters its directional queue), in transit, and completed (`wait`
//! stamped once when it leaves the crossing segment).  Nothing mutates a
//! vehicle after completion.

use std::fmt;

use crate::{Direction, Tick};

// ── VehicleId ────────────────────────────────────────────────────────────────

/// Index of a vehicle in the simulation's vehicle arena.
///
/// The inner integer is `pub` to allow direct indexing into `Vec<Vehicle>`
/// via `id.0 as usize`, but callers should prefer [`VehicleId::index`] for
/// clarity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl VehicleId {
    /// Sentinel meaning "no valid ID".
    pub const INVALID: VehicleId = VehicleId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for VehicleId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}

// ── Vehicle ──────────────────────────────────────────────────────────────────

/// One vehicle's identity and wait bookkeeping.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:           VehicleId,
    /// Fixed at creation.
    pub direction:    Direction,
    /// Scheduled arrival instant, fixed at creation (already time-scaled).
    pub arrival_time: Tick,
    /// Instant the vehicle actually entered its directional queue.
    /// Set once, by the generator, at enqueue — not at construction.
    pub queued_at:    Option<Tick>,
    /// Scaled milliseconds between `queued_at` and transit completion.
    /// Set once, at departure.  Immutable thereafter.
    pub wait:         Option<u64>,
}

impl Vehicle {
    pub fn new(id: VehicleId, direction: Direction, arrival_time: Tick) -> Self {
        Self {
            id,
            direction,
            arrival_time,
            queued_at: None,
            wait: None,
        }
    }

    /// Total order used for generator emission: arrival time, then ID.
    ///
    /// The ID tie-break (generation sequence) keeps emission deterministic
    /// when two vehicles draw the same arrival tick.  Queue service order is
    /// strict FIFO per direction and does not consult this ordering.
    #[inline]
    pub fn emission_key(&self) -> (Tick, VehicleId) {
        (self.arrival_time, self.id)
    }
}
