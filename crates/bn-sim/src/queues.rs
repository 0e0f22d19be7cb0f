//! The two directional waiting lines.

use std::collections::VecDeque;

use bn_core::{Direction, VehicleId};

/// One FIFO waiting line per direction, indexed by [`Direction::index`].
///
/// Each lane has a single producer (the generator) and a single consumer
/// (the matching worker).  Invariant: every vehicle is pushed exactly once
/// and popped exactly once before being recorded as completed.
#[derive(Default)]
pub struct DirectionalQueues {
    lanes: [VecDeque<VehicleId>; 2],
}

impl DirectionalQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `vehicle` to the tail of `direction`'s line.
    #[inline]
    pub fn push(&mut self, direction: Direction, vehicle: VehicleId) {
        self.lanes[direction.index()].push_back(vehicle);
    }

    /// Remove and return the head of `direction`'s line.
    #[inline]
    pub fn pop(&mut self, direction: Direction) -> Option<VehicleId> {
        self.lanes[direction.index()].pop_front()
    }

    #[inline]
    pub fn len(&self, direction: Direction) -> usize {
        self.lanes[direction.index()].len()
    }

    #[inline]
    pub fn is_empty(&self, direction: Direction) -> bool {
        self.lanes[direction.index()].is_empty()
    }
}
