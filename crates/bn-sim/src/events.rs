//! `EventQueue` — sparse per-tick event scheduling.
//!
//! # Why this exists
//!
//! The original implementation tied window length and transit time to actual
//! elapsed wall-clock time with tight polling loops.  The event queue
//! replaces that: anything that must happen later registers the tick at
//! which it needs attention, and the engine jumps the logical clock straight
//! to the earliest registered tick.  No sleeping, no polling, no dependence
//! on thread-scheduling jitter.
//!
//! # Determinism
//!
//! `BTreeMap` iteration yields ticks in ascending order, and events within
//! one tick dispatch in insertion order.  All insertion sites are themselves
//! deterministic (arrivals are pre-sorted; window and transit events are
//! scheduled by the single-threaded engine loop), so a run's event trace is
//! a pure function of its configuration.

use std::collections::BTreeMap;

use bn_core::{Direction, Tick, VehicleId};

/// Something scheduled to happen at a particular tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Event {
    /// A generated vehicle's arrival time has been reached; enqueue it.
    VehicleArrives(VehicleId),

    /// A direction's exclusive window has run out.
    ///
    /// `deadline` identifies the window: the handler ignores the event
    /// unless the worker still holds a window with this exact deadline
    /// (the worker may have already released via the transit-completion
    /// path in the same tick).
    WindowExpires { direction: Direction, deadline: Tick },

    /// The vehicle currently in the crossing segment finishes its transit.
    TransitComplete(VehicleId),
}

/// A priority queue mapping ticks → events due at that tick.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<Tick, Vec<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at `tick`.
    pub fn push(&mut self, tick: Tick, event: Event) {
        self.inner.entry(tick).or_default().push(event);
        self.total += 1;
    }

    /// Remove and return the earliest tick together with everything due at
    /// it, or `None` if the queue is empty.
    pub fn pop_tick(&mut self) -> Option<(Tick, Vec<Event>)> {
        let (tick, events) = self.inner.pop_first()?;
        self.total -= events.len();
        Some((tick, events))
    }

    /// The earliest tick with at least one queued event.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of queued events across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
