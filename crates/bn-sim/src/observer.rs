//! Simulation observer trait for progress reporting and instrumentation.

use bn_core::{Direction, Tick, VehicleId};

/// Callbacks invoked by [`Simulation::run_with_observer`][crate::Simulation::run_with_observer]
/// at key points in the run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The property tests use observers to
/// check mutual exclusion, window bounds, and fairness without reaching into
/// engine internals.
///
/// # Example — window logger
///
/// ```rust,ignore
/// struct WindowLogger;
///
/// impl SimObserver for WindowLogger {
///     fn on_window_open(&mut self, dir: Direction, at: Tick, deadline: Tick) {
///         println!("{at}: {dir} holds until {deadline}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// A vehicle entered its directional queue (`queued_at` just stamped).
    fn on_enqueue(&mut self, _vehicle: VehicleId, _direction: Direction, _at: Tick) {}

    /// A direction was granted the lock; its window runs until `deadline`.
    fn on_window_open(&mut self, _direction: Direction, _at: Tick, _deadline: Tick) {}

    /// The holding direction released the lock.
    fn on_window_close(&mut self, _direction: Direction, _at: Tick) {}

    /// A vehicle was admitted into the crossing segment.
    fn on_transit_start(&mut self, _vehicle: VehicleId, _direction: Direction, _at: Tick) {}

    /// A vehicle finished its transit; `wait` is its scaled wait duration.
    fn on_transit_complete(
        &mut self,
        _vehicle:   VehicleId,
        _direction: Direction,
        _at:        Tick,
        _wait:      u64,
    ) {}

    /// A direction stopped contending permanently.
    fn on_retire(&mut self, _direction: Direction, _at: Tick) {}

    /// The run completed (both directions retired).
    fn on_sim_end(&mut self, _final_tick: Tick, _completed: usize) {}
}

/// A [`SimObserver`] that does nothing.  Used by [`Simulation::run`][crate::Simulation::run].
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
