//! Per-direction worker state.
//!
//! One worker is logically attached to each direction.  Its lifecycle:
//!
//! ```text
//! Contending ──grant──▶ Holding { deadline, in_transit }
//!     ▲                     │ now >= deadline (between vehicles only)
//!     └──────re-contend─────┴──▶ Retired  (queue empty + no pending arrivals)
//! ```
//!
//! The retire check runs only between windows (and once at startup), never
//! while holding — a worker always finishes its window before leaving.

use bn_core::{Direction, Tick};

/// Where a worker is in its acquire/drain/release cycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WorkerPhase {
    /// Waiting in the lock's FIFO line.
    Contending,

    /// Holding the exclusive window.
    ///
    /// `in_transit` is set while a vehicle of this direction occupies the
    /// crossing segment; the window may expire during a transit but release
    /// is deferred until the transit completes.
    Holding { deadline: Tick, in_transit: bool },

    /// Permanently done contending.  Two retirements end the run.
    Retired,
}

/// One direction's arbiter worker.
pub struct Worker {
    pub direction: Direction,
    pub phase:     WorkerPhase,
    /// Windows this worker has held, for reporting.
    pub windows_held: u64,
}

impl Worker {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            phase: WorkerPhase::Contending,
            windows_held: 0,
        }
    }

    #[inline]
    pub fn is_retired(&self) -> bool {
        self.phase == WorkerPhase::Retired
    }

    /// `true` while this worker holds the lock.
    #[inline]
    pub fn is_holding(&self) -> bool {
        matches!(self.phase, WorkerPhase::Holding { .. })
    }
}
