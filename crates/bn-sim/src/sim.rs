//! The `Simulation` struct and its event loop.

use bn_core::{Direction, RunConfig, SimRng, Tick, Vehicle, VehicleId};

use crate::events::{Event, EventQueue};
use crate::generator::ArrivalGenerator;
use crate::lock::FairLock;
use crate::observer::{NoopObserver, SimObserver};
use crate::queues::DirectionalQueues;
use crate::segment::CrossingSegment;
use crate::stats::{CompletedVehicle, RunSummary, WaitStats};
use crate::worker::{Worker, WorkerPhase};
use crate::{SimError, SimResult};

/// One configured simulation run.
///
/// Constructed from a validated [`RunConfig`]; running it to completion
/// yields a [`RunSummary`].  Instances share nothing, so a driver may run
/// any number of them concurrently without extra synchronization.
///
/// The run loop pops event batches in tick order and advances the logical
/// clock straight to each batch — between events nothing can change, so
/// nothing is simulated between them.  A run ends when both directional
/// workers have retired.
pub struct Simulation {
    config:        RunConfig,
    /// Window length on the logical clock, cached from the config.
    scaled_window: u64,
    clock:         Tick,
    vehicles:      Vec<Vehicle>,
    events:        EventQueue,
    generator:     ArrivalGenerator,
    queues:        DirectionalQueues,
    lock:          FairLock,
    segment:       CrossingSegment,
    workers:       [Worker; 2],
    stats:         WaitStats,
    completed:     Vec<CompletedVehicle>,
}

impl Simulation {
    /// Validate `config` and build a ready-to-run simulation.
    ///
    /// The vehicle population is generated here (deterministically from
    /// `config.seed`); a configuration error is reported now and the run
    /// never starts.
    pub fn new(config: RunConfig) -> SimResult<Self> {
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let mut events = EventQueue::new();
        let (vehicles, generator) = ArrivalGenerator::generate(&config, &mut rng, &mut events);

        let scaled_window = config.scaled_window();
        let segment = CrossingSegment::new(config.scaled_transit());
        let vehicle_count = config.vehicle_count;

        Ok(Self {
            config,
            scaled_window,
            clock: Tick::ZERO,
            vehicles,
            events,
            generator,
            queues: DirectionalQueues::new(),
            lock: FairLock::new(),
            segment,
            workers: [Worker::new(Direction::North), Worker::new(Direction::South)],
            stats: WaitStats::new(),
            completed: Vec::with_capacity(vehicle_count),
        })
    }

    /// Build a run from an explicit arrival script instead of the seeded
    /// generator — a deterministic fixture for scenario tests and what-if
    /// studies.  Arrival ticks are taken as already scaled;
    /// `config.vehicle_count` and `config.seed` are ignored.
    pub fn with_arrivals(config: RunConfig, script: &[(Direction, Tick)]) -> SimResult<Self> {
        config.validate()?;

        let mut events = EventQueue::new();
        let (vehicles, generator) = ArrivalGenerator::from_script(script, &mut events);

        let scaled_window = config.scaled_window();
        let segment = CrossingSegment::new(config.scaled_transit());
        let capacity = script.len();

        Ok(Self {
            config,
            scaled_window,
            clock: Tick::ZERO,
            vehicles,
            events,
            generator,
            queues: DirectionalQueues::new(),
            lock: FairLock::new(),
            segment,
            workers: [Worker::new(Direction::North), Worker::new(Direction::South)],
            stats: WaitStats::new(),
            completed: Vec::with_capacity(capacity),
        })
    }

    /// The configuration this run was built from.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    // ── Public run API ────────────────────────────────────────────────────

    /// Run to completion, blocking until both directions retire.
    pub fn run(self) -> SimResult<RunSummary> {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Run to completion with observer callbacks.
    pub fn run_with_observer<O: SimObserver>(self, observer: &mut O) -> SimResult<RunSummary> {
        let (summary, _records) = self.run_detailed(observer)?;
        Ok(summary)
    }

    /// Run to completion, returning the summary together with per-vehicle
    /// terminal records in completion order (for reporting/export).
    pub fn run_detailed<O: SimObserver>(
        mut self,
        observer: &mut O,
    ) -> SimResult<(RunSummary, Vec<CompletedVehicle>)> {
        // Both workers enter arbitration at tick 0.  A direction whose
        // retire condition already holds (no arrivals at all) retires
        // without ever contending.  North goes first: this fixed order is
        // the deterministic stand-in for the original's startup race.
        for direction in Direction::BOTH {
            self.enter_arbitration(direction, observer)?;
        }

        while !self.all_retired() {
            let Some((tick, batch)) = self.events.pop_tick() else {
                return Err(SimError::Stalled { at: self.clock });
            };
            debug_assert!(tick >= self.clock, "event queue went backwards");
            self.clock = tick;
            for event in batch {
                self.dispatch(event, observer)?;
            }
        }

        observer.on_sim_end(self.clock, self.completed.len());

        let windows_held = [self.workers[0].windows_held, self.workers[1].windows_held];
        let summary = self
            .stats
            .finish(self.config.time_scale, self.clock, windows_held);
        Ok((summary, self.completed))
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    fn dispatch<O: SimObserver>(&mut self, event: Event, observer: &mut O) -> SimResult<()> {
        match event {
            Event::VehicleArrives(id) => self.handle_arrival(id, observer),

            Event::WindowExpires { direction, deadline } => {
                // Only honoured while the worker still holds this exact
                // window; it may already have released via the
                // transit-completion path earlier in the same tick.
                match self.workers[direction.index()].phase {
                    WorkerPhase::Holding { deadline: held, .. } if held == deadline => {
                        self.poke(direction, observer)
                    }
                    _ => Ok(()),
                }
            }

            Event::TransitComplete(id) => self.handle_transit_complete(id, observer),
        }
    }

    fn handle_arrival<O: SimObserver>(&mut self, id: VehicleId, observer: &mut O) -> SimResult<()> {
        let now = self.clock;
        let direction = self.vehicles[id.index()].direction;
        debug_assert!(
            !self.workers[direction.index()].is_retired(),
            "arrival for a retired direction"
        );

        self.vehicles[id.index()].queued_at = Some(now);
        self.queues.push(direction, id);
        self.generator.mark_enqueued(direction);
        observer.on_enqueue(id, direction, now);

        // If this direction holds the window and was idling on an empty
        // queue, the new arrival can start transiting immediately.
        self.poke(direction, observer)
    }

    fn handle_transit_complete<O: SimObserver>(
        &mut self,
        id: VehicleId,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock;
        let departed = self.segment.depart(now)?;
        debug_assert_eq!(departed, id, "segment occupant does not match event");

        let vehicle = &mut self.vehicles[id.index()];
        let queued_at = vehicle
            .queued_at
            .ok_or(SimError::NeverQueued { vehicle: id })?;
        let wait = now
            .checked_since(queued_at)
            .ok_or(SimError::NegativeWait { vehicle: id, at: now })?;
        vehicle.wait = Some(wait);

        let direction = vehicle.direction;
        self.stats.record(direction, wait);
        self.completed.push(CompletedVehicle {
            id,
            direction,
            arrival: self.vehicles[id.index()].arrival_time,
            queued_at,
            departed: now,
            wait,
        });
        observer.on_transit_complete(id, direction, now, wait);

        // The worker is between vehicles again: drain the next one, or
        // release if the window has meanwhile expired.
        if let WorkerPhase::Holding { deadline, .. } = self.workers[direction.index()].phase {
            self.workers[direction.index()].phase = WorkerPhase::Holding {
                deadline,
                in_transit: false,
            };
        }
        self.poke(direction, observer)
    }

    // ── Worker state machine ──────────────────────────────────────────────

    /// Advance `direction`'s worker from its current state at the current
    /// clock.  Safe to call from any event handler; does nothing for
    /// contending or retired workers (those advance on grant).
    fn poke<O: SimObserver>(&mut self, direction: Direction, observer: &mut O) -> SimResult<()> {
        let now = self.clock;
        let WorkerPhase::Holding { deadline, in_transit } = self.workers[direction.index()].phase
        else {
            return Ok(());
        };

        if in_transit {
            // The window boundary is enforced only between vehicles; a
            // transit in flight always completes before release.
            return Ok(());
        }

        if now >= deadline {
            return self.release_window(direction, observer);
        }

        if let Some(id) = self.queues.pop(direction) {
            let departure = self.segment.admit(id, now)?;
            self.workers[direction.index()].phase = WorkerPhase::Holding {
                deadline,
                in_transit: true,
            };
            self.events.push(departure, Event::TransitComplete(id));
            observer.on_transit_start(id, direction, now);
        }
        // Empty queue: idle holding the lock until the window expires or an
        // arrival lands.
        Ok(())
    }

    /// Grant the lock to `direction` and open its window.
    fn grant_window<O: SimObserver>(
        &mut self,
        direction: Direction,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock;
        let deadline = now.offset(self.scaled_window);
        self.workers[direction.index()].phase = WorkerPhase::Holding {
            deadline,
            in_transit: false,
        };
        self.workers[direction.index()].windows_held += 1;
        self.events.push(deadline, Event::WindowExpires { direction, deadline });
        observer.on_window_open(direction, now, deadline);
        self.poke(direction, observer)
    }

    /// Release the lock unconditionally, hand it to the longest waiter, and
    /// send the releasing worker back through arbitration.
    fn release_window<O: SimObserver>(
        &mut self,
        direction: Direction,
        observer: &mut O,
    ) -> SimResult<()> {
        self.workers[direction.index()].phase = WorkerPhase::Contending;
        observer.on_window_close(direction, self.clock);

        if let Some(next) = self.lock.release() {
            self.grant_window(next, observer)?;
        }
        self.enter_arbitration(direction, observer)
    }

    /// Retire-or-contend: the top of the worker's outer loop.
    ///
    /// The pending check is per-direction (the generator counts each flow
    /// separately), so a direction can never retire while its own arrivals
    /// are still pending generation.
    fn enter_arbitration<O: SimObserver>(
        &mut self,
        direction: Direction,
        observer: &mut O,
    ) -> SimResult<()> {
        if self.queues.is_empty(direction) && self.generator.is_exhausted(direction) {
            self.workers[direction.index()].phase = WorkerPhase::Retired;
            observer.on_retire(direction, self.clock);
            return Ok(());
        }
        if self.lock.acquire(direction) {
            self.grant_window(direction, observer)
        } else {
            self.workers[direction.index()].phase = WorkerPhase::Contending;
            Ok(())
        }
    }

    #[inline]
    fn all_retired(&self) -> bool {
        self.workers.iter().all(Worker::is_retired)
    }
}
