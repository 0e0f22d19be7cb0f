//! Arrival generator: builds the vehicle population and feeds the queues.
//!
//! Directions are drawn 50/50 and arrival ticks uniformly in
//! `[0, scaled_horizon)`, all from the run's single seeded RNG, so the same
//! seed always produces the same population.  One `VehicleArrives` event is
//! scheduled per vehicle, in globally sorted `(arrival_time, id)` order, so
//! enqueue order can never violate arrival order.
//!
//! The generator also tracks how many vehicles of each direction have not
//! yet been enqueued.  A worker may only retire once `pending(dir) == 0`
//! *for its own direction* — checking a global pool instead would let a
//! direction retire while its own arrivals were still in flight.

use bn_core::{Direction, RunConfig, SimRng, Tick, Vehicle, VehicleId};

use crate::events::{Event, EventQueue};

/// Tracks which vehicles have yet to reach their directional queue.
pub struct ArrivalGenerator {
    /// Per-direction count of vehicles generated but not yet enqueued.
    pending: [usize; 2],
}

impl ArrivalGenerator {
    /// Generate exactly `config.vehicle_count` vehicles, schedule their
    /// arrival events, and return the vehicle arena plus the generator's
    /// pending bookkeeping.
    ///
    /// Draw order per vehicle is direction first, then arrival tick, and is
    /// part of the reproducibility contract.
    pub fn generate(
        config: &RunConfig,
        rng:    &mut SimRng,
        events: &mut EventQueue,
    ) -> (Vec<Vehicle>, ArrivalGenerator) {
        let horizon = config.scaled_horizon();
        let mut pending = [0usize; 2];

        let mut vehicles: Vec<Vehicle> = (0..config.vehicle_count)
            .map(|i| {
                let direction = if rng.gen_bool(0.5) {
                    Direction::North
                } else {
                    Direction::South
                };
                let arrival = Tick(rng.gen_range(0..horizon));
                pending[direction.index()] += 1;
                Vehicle::new(VehicleId(i as u32), direction, arrival)
            })
            .collect();

        // Emission order: globally time-sorted, ties broken by generation
        // sequence.  The arena itself stays indexed by id.
        let mut order: Vec<VehicleId> = vehicles.iter().map(|v| v.id).collect();
        order.sort_by_key(|id| vehicles[id.index()].emission_key());
        for id in order {
            let arrival = vehicles[id.index()].arrival_time;
            events.push(arrival, Event::VehicleArrives(id));
        }

        // Keep the arena immutable from here on except for the two one-shot
        // stamps (queued_at, wait) applied by the engine.
        vehicles.shrink_to_fit();

        (vehicles, ArrivalGenerator { pending })
    }

    /// Build a fixed population from an explicit `(direction, arrival)`
    /// script instead of the RNG — the fixture behind
    /// [`Simulation::with_arrivals`][crate::Simulation::with_arrivals].
    /// Arrival ticks are taken as already scaled.
    pub fn from_script(
        script: &[(Direction, Tick)],
        events: &mut EventQueue,
    ) -> (Vec<Vehicle>, ArrivalGenerator) {
        let mut pending = [0usize; 2];
        let vehicles: Vec<Vehicle> = script
            .iter()
            .enumerate()
            .map(|(i, &(direction, arrival))| {
                pending[direction.index()] += 1;
                Vehicle::new(VehicleId(i as u32), direction, arrival)
            })
            .collect();

        let mut order: Vec<VehicleId> = vehicles.iter().map(|v| v.id).collect();
        order.sort_by_key(|id| vehicles[id.index()].emission_key());
        for id in order {
            events.push(vehicles[id.index()].arrival_time, Event::VehicleArrives(id));
        }

        (vehicles, ArrivalGenerator { pending })
    }

    /// Vehicles of `direction` generated but not yet enqueued.
    #[inline]
    pub fn pending(&self, direction: Direction) -> usize {
        self.pending[direction.index()]
    }

    /// `true` once every vehicle of `direction` has entered its queue.
    #[inline]
    pub fn is_exhausted(&self, direction: Direction) -> bool {
        self.pending[direction.index()] == 0
    }

    /// Record that one vehicle of `direction` has been enqueued.
    #[inline]
    pub fn mark_enqueued(&mut self, direction: Direction) {
        debug_assert!(self.pending[direction.index()] > 0);
        self.pending[direction.index()] -= 1;
    }
}
