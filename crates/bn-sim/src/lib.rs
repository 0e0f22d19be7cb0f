//! `bn-sim` — the scheduling and arbitration engine.
//!
//! Simulates vehicles crossing a one-lane bidirectional bottleneck where
//! only one direction may occupy the shared segment at a time and access
//! alternates in fixed-length time windows.
//!
//! # Engine shape
//!
//! The original flagger protocol is inherently concurrent: an arrival feeder
//! and two directional workers racing for a fair binary semaphore.  Here the
//! same protocol runs as a deterministic discrete-event loop on a logical
//! clock — the three tasks become explicit state machines advanced by an
//! [`EventQueue`], and the semaphore becomes an explicit FIFO
//! [`FairLock`].  Every observable property survives (window alternation,
//! lock fairness, FIFO service per direction, wait accounting) but runs are
//! reproducible from a seed and finish in microseconds instead of simulated
//! hours.
//!
//! ```text
//! loop until both workers retired:
//!   ① pop the earliest event batch; advance the clock to it
//!   ② VehicleArrives   → stamp queued_at, push into directional queue,
//!                        poke that direction's worker
//!   ③ WindowExpires    → poke the holding worker (release if idle)
//!   ④ TransitComplete  → stamp wait, record completion, poke the worker
//!                        (drain next vehicle, or release past the deadline)
//! ```
//!
//! # Quick-start
//!
//! ```rust
//! use bn_core::RunConfig;
//! use bn_sim::Simulation;
//!
//! let config = RunConfig {
//!     window_length_ms:   120_000,
//!     transit_ms:         5_000,
//!     vehicle_count:      200,
//!     arrival_horizon_ms: 3_600_000,
//!     time_scale:         1.0,
//!     seed:               42,
//! };
//! let summary = Simulation::new(config).unwrap().run().unwrap();
//! assert_eq!(summary.completed, 200);
//! ```

pub mod error;
pub mod events;
pub mod generator;
pub mod lock;
pub mod observer;
pub mod queues;
pub mod segment;
pub mod sim;
pub mod stats;
pub mod worker;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use events::{Event, EventQueue};
pub use generator::ArrivalGenerator;
pub use lock::FairLock;
pub use observer::{NoopObserver, SimObserver};
pub use queues::DirectionalQueues;
pub use segment::CrossingSegment;
pub use sim::Simulation;
pub use stats::{CompletedVehicle, RunSummary, WaitStats};
pub use worker::{Worker, WorkerPhase};
