//! Integration tests for bn-sim.

use bn_core::{Direction, RunConfig, SimRng, Tick, VehicleId};

use crate::events::{Event, EventQueue};
use crate::generator::ArrivalGenerator;
use crate::lock::FairLock;
use crate::observer::SimObserver;
use crate::queues::DirectionalQueues;
use crate::segment::CrossingSegment;
use crate::{SimError, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(window_ms: u64, transit_ms: u64, count: usize, horizon_ms: u64) -> RunConfig {
    RunConfig {
        window_length_ms:   window_ms,
        transit_ms,
        vehicle_count:      count,
        arrival_horizon_ms: horizon_ms,
        time_scale:         1.0,
        seed:               42,
    }
}

use Direction::{North, South};

// ── EventQueue ────────────────────────────────────────────────────────────────

mod event_queue_tests {
    use super::*;

    #[test]
    fn pops_ticks_in_ascending_order() {
        let mut q = EventQueue::new();
        q.push(Tick(30), Event::VehicleArrives(VehicleId(2)));
        q.push(Tick(10), Event::VehicleArrives(VehicleId(0)));
        q.push(Tick(20), Event::VehicleArrives(VehicleId(1)));

        let ticks: Vec<Tick> = std::iter::from_fn(|| q.pop_tick().map(|(t, _)| t)).collect();
        assert_eq!(ticks, vec![Tick(10), Tick(20), Tick(30)]);
    }

    #[test]
    fn same_tick_events_keep_insertion_order() {
        let mut q = EventQueue::new();
        q.push(Tick(5), Event::VehicleArrives(VehicleId(0)));
        q.push(Tick(5), Event::TransitComplete(VehicleId(1)));

        let (_, events) = q.pop_tick().unwrap();
        assert_eq!(events[0], Event::VehicleArrives(VehicleId(0)));
        assert_eq!(events[1], Event::TransitComplete(VehicleId(1)));
    }

    #[test]
    fn len_tracks_pushes_and_pops() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        q.push(Tick(1), Event::VehicleArrives(VehicleId(0)));
        q.push(Tick(1), Event::VehicleArrives(VehicleId(1)));
        assert_eq!(q.len(), 2);
        q.pop_tick();
        assert!(q.is_empty());
        assert_eq!(q.next_tick(), None);
    }
}

// ── FairLock ──────────────────────────────────────────────────────────────────

mod lock_tests {
    use super::*;

    #[test]
    fn free_lock_grants_immediately() {
        let mut lock = FairLock::new();
        assert!(lock.acquire(North));
        assert_eq!(lock.owner(), Some(North));
    }

    #[test]
    fn contended_lock_queues_the_second_requester() {
        let mut lock = FairLock::new();
        assert!(lock.acquire(North));
        assert!(!lock.acquire(South));
        assert_eq!(lock.waiting(), 1);
    }

    #[test]
    fn release_hands_to_longest_waiter() {
        let mut lock = FairLock::new();
        let _ = lock.acquire(North);
        let _ = lock.acquire(South);
        let _ = lock.acquire(North); // North re-queues behind South
        assert_eq!(lock.release(), Some(South));
        assert_eq!(lock.release(), Some(North));
        assert_eq!(lock.release(), None);
        assert_eq!(lock.owner(), None);
    }
}

// ── DirectionalQueues ─────────────────────────────────────────────────────────

mod queues_tests {
    use super::*;

    #[test]
    fn fifo_per_direction() {
        let mut q = DirectionalQueues::new();
        q.push(North, VehicleId(0));
        q.push(South, VehicleId(1));
        q.push(North, VehicleId(2));

        assert_eq!(q.len(North), 2);
        assert_eq!(q.pop(North), Some(VehicleId(0)));
        assert_eq!(q.pop(North), Some(VehicleId(2)));
        assert_eq!(q.pop(North), None);
        assert!(q.is_empty(North));
        assert_eq!(q.pop(South), Some(VehicleId(1)));
    }
}

// ── CrossingSegment ───────────────────────────────────────────────────────────

mod segment_tests {
    use super::*;

    #[test]
    fn admit_returns_departure_tick() {
        let mut seg = CrossingSegment::new(5_000);
        let departure = seg.admit(VehicleId(0), Tick(100)).unwrap();
        assert_eq!(departure, Tick(5_100));
        assert_eq!(seg.occupant(), Some(VehicleId(0)));
    }

    #[test]
    fn double_admission_is_a_fatal_fault() {
        let mut seg = CrossingSegment::new(5_000);
        seg.admit(VehicleId(0), Tick(0)).unwrap();
        let err = seg.admit(VehicleId(1), Tick(1)).unwrap_err();
        assert!(matches!(err, SimError::SegmentOccupied { .. }));
    }

    #[test]
    fn depart_clears_the_occupant() {
        let mut seg = CrossingSegment::new(1_000);
        seg.admit(VehicleId(7), Tick(0)).unwrap();
        assert_eq!(seg.depart(Tick(1_000)).unwrap(), VehicleId(7));
        assert_eq!(seg.occupant(), None);
        assert!(matches!(
            seg.depart(Tick(1_000)),
            Err(SimError::SegmentEmpty { .. })
        ));
    }
}

// ── ArrivalGenerator ──────────────────────────────────────────────────────────

mod generator_tests {
    use super::*;

    #[test]
    fn generates_exact_count_within_horizon() {
        let cfg = config(120_000, 5_000, 300, 60_000);
        let mut rng = SimRng::new(cfg.seed);
        let mut events = EventQueue::new();
        let (vehicles, generator) = ArrivalGenerator::generate(&cfg, &mut rng, &mut events);

        assert_eq!(vehicles.len(), 300);
        assert_eq!(events.len(), 300);
        assert_eq!(generator.pending(North) + generator.pending(South), 300);
        for v in &vehicles {
            assert!(v.arrival_time.0 < cfg.scaled_horizon());
            assert_eq!(v.queued_at, None);
        }
    }

    #[test]
    fn arrival_events_fire_in_time_order() {
        let cfg = config(120_000, 5_000, 200, 60_000);
        let mut rng = SimRng::new(7);
        let mut events = EventQueue::new();
        let _ = ArrivalGenerator::generate(&cfg, &mut rng, &mut events);

        let mut last = Tick::ZERO;
        while let Some((tick, _)) = events.pop_tick() {
            assert!(tick >= last);
            last = tick;
        }
    }

    #[test]
    fn same_seed_same_population() {
        let cfg = config(120_000, 5_000, 100, 60_000);
        let mut events_a = EventQueue::new();
        let mut events_b = EventQueue::new();
        let (a, _) = ArrivalGenerator::generate(&cfg, &mut SimRng::new(5), &mut events_a);
        let (b, _) = ArrivalGenerator::generate(&cfg, &mut SimRng::new(5), &mut events_b);

        for (va, vb) in a.iter().zip(&b) {
            assert_eq!(va.direction, vb.direction);
            assert_eq!(va.arrival_time, vb.arrival_time);
        }
    }

    #[test]
    fn mark_enqueued_drains_pending() {
        let mut events = EventQueue::new();
        let (_, mut generator) =
            ArrivalGenerator::from_script(&[(North, Tick(0)), (North, Tick(5))], &mut events);
        assert_eq!(generator.pending(North), 2);
        assert!(generator.is_exhausted(South));
        generator.mark_enqueued(North);
        generator.mark_enqueued(North);
        assert!(generator.is_exhausted(North));
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

mod construction_tests {
    use super::*;

    #[test]
    fn invalid_config_rejected_before_run() {
        let mut cfg = config(120_000, 5_000, 10, 60_000);
        cfg.window_length_ms = 0;
        assert!(matches!(Simulation::new(cfg), Err(SimError::Core(_))));
    }

    #[test]
    fn valid_config_constructs() {
        let sim = Simulation::new(config(120_000, 5_000, 10, 60_000)).unwrap();
        assert_eq!(sim.config().vehicle_count, 10);
    }
}

// ── Recording observers ───────────────────────────────────────────────────────

/// Records window grants, closes, transit intervals, and retirements.
#[derive(Default)]
struct Recorder {
    grants:   Vec<(Direction, Tick)>,
    closes:   Vec<(Direction, Tick)>,
    transits: Vec<(Direction, Tick)>, // start only; end = start + transit
    retires:  Vec<(Direction, Tick)>,
}

impl SimObserver for Recorder {
    fn on_window_open(&mut self, direction: Direction, at: Tick, _deadline: Tick) {
        self.grants.push((direction, at));
    }
    fn on_window_close(&mut self, direction: Direction, at: Tick) {
        self.closes.push((direction, at));
    }
    fn on_transit_start(&mut self, _vehicle: VehicleId, direction: Direction, at: Tick) {
        self.transits.push((direction, at));
    }
    fn on_retire(&mut self, direction: Direction, at: Tick) {
        self.retires.push((direction, at));
    }
}

// ── Scenario: interleaved arrivals (spec scenario) ────────────────────────────

mod scenario_interleaved {
    use super::*;

    /// Two vehicles per direction, interleaved N,S,N,S at [0,10,20,30] with a
    /// window far larger than two transits: the first (North) window drains
    /// both North vehicles before any South vehicle transits.
    #[test]
    fn first_window_drains_north_completely() {
        let cfg = config(120_000, 5_000, 4, 60_000);
        let script = [
            (North, Tick(0)),
            (South, Tick(10)),
            (North, Tick(20)),
            (South, Tick(30)),
        ];
        let sim = Simulation::with_arrivals(cfg, &script).unwrap();
        let mut rec = Recorder::default();
        let (summary, records) = sim.run_detailed(&mut rec).unwrap();

        assert_eq!(summary.completed, 4);
        let order: Vec<Direction> = records.iter().map(|r| r.direction).collect();
        assert_eq!(order, vec![North, North, South, South]);

        // North contends first at startup, by the Direction::BOTH order.
        assert_eq!(rec.grants[0].0, North);
        assert_eq!(summary.windows_held, [1, 1]);

        // Exact accounting: v0 waits one transit; v2 queues at 20 and
        // departs at 10 000; the South pair waits out the whole first window.
        assert_eq!(records[0].wait, 5_000);
        assert_eq!(records[1].wait, 9_980);
        assert_eq!(records[2].wait, 124_990);
        assert_eq!(records[3].wait, 129_970);
        assert_eq!(summary.average_wait_ms, 269_940.0 / 4.0);
        assert_eq!(summary.final_tick, Tick(240_000));
    }
}

// ── Scenario: degenerate inputs ───────────────────────────────────────────────

mod scenario_degenerate {
    use super::*;

    #[test]
    fn zero_vehicles_completes_immediately_with_zero_average() {
        let summary = Simulation::new(config(120_000, 5_000, 0, 60_000))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.average_wait_ms, 0.0);
        assert_eq!(summary.final_tick, Tick::ZERO);
        assert_eq!(summary.windows_held, [0, 0]);
    }

    #[test]
    fn idle_direction_retires_without_ever_acquiring() {
        let cfg = config(100_000, 1_000, 3, 60_000);
        let script = [(North, Tick(0)), (North, Tick(5)), (North, Tick(10))];
        let sim = Simulation::with_arrivals(cfg, &script).unwrap();
        let mut rec = Recorder::default();
        let (summary, _) = sim.run_detailed(&mut rec).unwrap();

        // South retires at startup, before any grant.
        assert_eq!(rec.retires[0], (South, Tick::ZERO));
        assert!(rec.grants.iter().all(|&(dir, _)| dir == North));
        assert_eq!(summary.windows_held[South.index()], 0);

        // Waits: 1 000 + 1 995 + 2 990.
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.average_wait_ms, 5_985.0 / 3.0);
        assert_eq!(summary.completed_per_direction, [3, 0]);
    }
}

// ── Properties on seeded random runs ──────────────────────────────────────────

mod property_tests {
    use super::*;

    fn run_recorded(cfg: RunConfig) -> (crate::RunSummary, Vec<crate::stats::CompletedVehicle>, Recorder) {
        let sim = Simulation::new(cfg).unwrap();
        let mut rec = Recorder::default();
        let (summary, records) = sim.run_detailed(&mut rec).unwrap();
        (summary, records, rec)
    }

    fn busy_config(seed: u64) -> RunConfig {
        // Deliberately saturated: 400 vehicles over a minute with a short
        // window, so both directions stay backlogged and alternate often.
        RunConfig {
            window_length_ms:   4_000,
            transit_ms:         150,
            vehicle_count:      400,
            arrival_horizon_ms: 60_000,
            time_scale:         1.0,
            seed,
        }
    }

    #[test]
    fn conservation_no_vehicle_lost_or_duplicated() {
        let (summary, records, _) = run_recorded(busy_config(1));
        assert_eq!(summary.completed, 400);
        assert_eq!(records.len(), 400);

        let mut seen = vec![false; 400];
        for r in &records {
            assert!(!seen[r.id.index()], "vehicle {} completed twice", r.id);
            seen[r.id.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn waits_are_non_negative_and_at_least_one_transit() {
        let (_, records, _) = run_recorded(busy_config(2));
        for r in &records {
            assert!(r.wait >= 150, "wait includes the transit itself");
            assert!(r.departed >= r.queued_at);
            assert!(r.queued_at >= r.arrival);
        }
    }

    #[test]
    fn fifo_service_within_each_direction() {
        let (_, records, _) = run_recorded(busy_config(3));
        for dir in Direction::BOTH {
            let mut last_queued = Tick::ZERO;
            for r in records.iter().filter(|r| r.direction == dir) {
                assert!(
                    r.queued_at >= last_queued,
                    "{dir} served out of enqueue order"
                );
                last_queued = r.queued_at;
            }
        }
    }

    #[test]
    fn mutual_exclusion_transits_never_overlap() {
        let (_, _, rec) = run_recorded(busy_config(4));
        // The segment is serial: every transit (from either direction) must
        // end before the next begins.
        let mut transits = rec.transits.clone();
        transits.sort_by_key(|&(_, start)| start);
        for pair in transits.windows(2) {
            let (_, a_start) = pair[0];
            let (_, b_start) = pair[1];
            assert!(
                a_start.offset(150) <= b_start,
                "transit at {a_start} overlaps transit at {b_start}"
            );
        }
    }

    #[test]
    fn window_hold_never_exceeds_window_plus_one_transit() {
        let (_, _, rec) = run_recorded(busy_config(5));
        // Every grant is eventually closed; grants and closes pair up in
        // order per direction.
        assert_eq!(rec.grants.len(), rec.closes.len());
        for dir in Direction::BOTH {
            let opens: Vec<Tick> = rec.grants.iter().filter(|g| g.0 == dir).map(|g| g.1).collect();
            let closes: Vec<Tick> = rec.closes.iter().filter(|c| c.0 == dir).map(|c| c.1).collect();
            assert_eq!(opens.len(), closes.len());
            for (open, close) in opens.iter().zip(&closes) {
                let held = close.since(*open);
                assert!(
                    held <= 4_000 + 150,
                    "{dir} held the lock for {held} ms (window 4000 + transit 150)"
                );
                assert!(held >= 4_000, "a window is never yielded early");
            }
        }
    }

    #[test]
    fn fairness_no_back_to_back_grants_while_other_waits() {
        let (_, _, rec) = run_recorded(busy_config(6));
        // A direction may be granted twice in a row only once the other
        // direction has retired.
        for pair in rec.grants.windows(2) {
            let ((prev, _), (next, at)) = (pair[0], pair[1]);
            if prev == next {
                let other_retired = rec
                    .retires
                    .iter()
                    .any(|&(dir, when)| dir == prev.opposite() && when <= at);
                assert!(
                    other_retired,
                    "{next} granted twice in a row at {at} while {} still contended",
                    next.opposite()
                );
            }
        }
    }

    #[test]
    fn saturated_alternation_is_strict() {
        // Both directions at t=0 with one transit per window: grants must
        // alternate N,S,N,S until the backlogs drain.
        let cfg = config(1_000, 600, 6, 60_000);
        let script = [
            (North, Tick(0)),
            (South, Tick(0)),
            (North, Tick(0)),
            (South, Tick(0)),
            (North, Tick(0)),
            (South, Tick(0)),
        ];
        let sim = Simulation::with_arrivals(cfg, &script).unwrap();
        let mut rec = Recorder::default();
        let _ = sim.run_detailed(&mut rec).unwrap();

        let dirs: Vec<Direction> = rec.grants.iter().map(|g| g.0).collect();
        assert_eq!(dirs, vec![North, South, North, South]);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

mod determinism_tests {
    use super::*;

    #[test]
    fn same_seed_identical_summary_and_records() {
        let cfg = config(9_000, 200, 250, 45_000);
        let (summary_a, records_a) = Simulation::new(cfg.clone())
            .unwrap()
            .run_detailed(&mut crate::NoopObserver)
            .unwrap();
        let (summary_b, records_b) = Simulation::new(cfg)
            .unwrap()
            .run_detailed(&mut crate::NoopObserver)
            .unwrap();
        assert_eq!(summary_a, summary_b);
        assert_eq!(records_a, records_b);
    }

    #[test]
    fn different_seeds_differ() {
        let mut cfg = config(9_000, 200, 250, 45_000);
        let a = Simulation::new(cfg.clone()).unwrap().run().unwrap();
        cfg.seed = 43;
        let b = Simulation::new(cfg).unwrap().run().unwrap();
        // Statistically certain for 250 uniformly drawn vehicles.
        assert_ne!(a.average_wait_ms, b.average_wait_ms);
    }
}

// ── Time scale ────────────────────────────────────────────────────────────────

mod time_scale_tests {
    use super::*;

    #[test]
    fn average_is_reported_in_real_units() {
        // One North vehicle at t=0, scale 0.5: transit becomes 2 500 logical
        // ms, and the 2 500 ms scaled wait divides back to 5 000 real ms.
        let mut cfg = config(120_000, 5_000, 1, 60_000);
        cfg.time_scale = 0.5;
        let sim = Simulation::with_arrivals(cfg, &[(North, Tick(0))]).unwrap();
        let (summary, records) = sim.run_detailed(&mut crate::NoopObserver).unwrap();

        assert_eq!(records[0].wait, 2_500);
        assert_eq!(summary.average_wait_ms, 5_000.0);
    }
}
