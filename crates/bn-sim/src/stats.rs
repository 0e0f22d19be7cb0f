//! Wait-time aggregation and run summaries.

use bn_core::{Direction, Tick, VehicleId};

// ── CompletedVehicle ─────────────────────────────────────────────────────────

/// Terminal record for one vehicle, in completion order.
///
/// All ticks are on the logical (scaled) clock; [`RunSummary`] converts the
/// aggregate back to real units.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CompletedVehicle {
    pub id:        VehicleId,
    pub direction: Direction,
    /// Scheduled arrival instant.
    pub arrival:   Tick,
    /// Instant the vehicle entered its directional queue.
    pub queued_at: Tick,
    /// Instant the vehicle left the crossing segment.
    pub departed:  Tick,
    /// `departed - queued_at`, in scaled milliseconds.
    pub wait:      u64,
}

// ── WaitStats ────────────────────────────────────────────────────────────────

/// Streaming accumulator for completed-vehicle wait times.
///
/// Only consulted after both workers retire; the run loop is the completion
/// barrier.
#[derive(Default)]
pub struct WaitStats {
    sum_wait: u64,
    max_wait: u64,
    completed_per_direction: [usize; 2],
}

impl WaitStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed vehicle's scaled wait.
    pub fn record(&mut self, direction: Direction, wait: u64) {
        self.sum_wait += wait;
        self.max_wait = self.max_wait.max(wait);
        self.completed_per_direction[direction.index()] += 1;
    }

    /// Total vehicles recorded so far.
    #[inline]
    pub fn completed(&self) -> usize {
        self.completed_per_direction.iter().sum()
    }

    /// Fold into a [`RunSummary`], converting scaled waits back to real
    /// milliseconds by dividing out `time_scale`.
    pub fn finish(self, time_scale: f64, final_tick: Tick, windows_held: [u64; 2]) -> RunSummary {
        let completed = self.completed();
        let (average_wait_ms, max_wait_ms) = if completed == 0 {
            // Degenerate zero-vehicle run: a defined result, never a
            // division fault.
            (0.0, 0.0)
        } else {
            (
                self.sum_wait as f64 / completed as f64 / time_scale,
                self.max_wait as f64 / time_scale,
            )
        };
        RunSummary {
            average_wait_ms,
            max_wait_ms,
            completed,
            completed_per_direction: self.completed_per_direction,
            windows_held,
            final_tick,
        }
    }
}

// ── RunSummary ───────────────────────────────────────────────────────────────

/// The result of one simulation run, in real time units.
#[derive(Clone, PartialEq, Debug)]
pub struct RunSummary {
    /// `sum(wait) / vehicle_count`, divided back by `time_scale`.
    pub average_wait_ms: f64,

    /// Largest single wait observed, in real milliseconds.
    pub max_wait_ms: f64,

    /// Vehicles that completed transit.  Equals the configured vehicle
    /// count for every correct run (conservation).
    pub completed: usize,

    /// Completion counts indexed by [`Direction::index`].
    pub completed_per_direction: [usize; 2],

    /// Exclusive windows each direction held, indexed by [`Direction::index`].
    pub windows_held: [u64; 2],

    /// Logical instant at which the run ended.
    pub final_tick: Tick,
}
