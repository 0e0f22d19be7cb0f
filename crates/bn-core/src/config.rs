//! Run configuration and construction-time validation.

use crate::{BnError, BnResult};

/// Reference traffic volume: vehicles crossing per simulated day.
pub const DEFAULT_VEHICLE_COUNT: usize = 15_000;

/// Reference transit time through the restricted segment, in milliseconds
/// (180 ft at 25 mph ≈ 5 s).
pub const DEFAULT_TRANSIT_MS: u64 = 5_000;

/// Reference arrival horizon: one simulated day, in milliseconds.
pub const DEFAULT_ARRIVAL_HORIZON_MS: u64 = 1_450 * 60_000;

// ── RunConfig ────────────────────────────────────────────────────────────────

/// Configuration for one simulation run.
///
/// All durations are real milliseconds; `time_scale` compresses them into
/// the logical clock at construction (`scaled_*` accessors) and the
/// statistics divide it back out, so reported averages are always in real
/// units.  The same config — including `seed` — always produces an
/// identical run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// How long one direction holds exclusive access before yielding.
    pub window_length_ms: u64,

    /// Fixed time one vehicle occupies the crossing segment.
    pub transit_ms: u64,

    /// Number of vehicles to generate.  Zero is an allowed degenerate run
    /// that completes immediately with an average wait of 0.
    pub vehicle_count: usize,

    /// Span over which arrival times are drawn, `[0, horizon)`.
    pub arrival_horizon_ms: u64,

    /// Clock compression factor.  1.0 = real durations; 0.01 = 1% of them.
    /// Purely a property of the simulated clock, not of the arbitration.
    pub time_scale: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl RunConfig {
    /// A config using the reference traffic volumes of the original study
    /// (15 000 vehicles/day, 5 s transit, 24 h horizon).
    pub fn reference_traffic(window_length_ms: u64, time_scale: f64, seed: u64) -> Self {
        Self {
            window_length_ms,
            transit_ms: DEFAULT_TRANSIT_MS,
            vehicle_count: DEFAULT_VEHICLE_COUNT,
            arrival_horizon_ms: DEFAULT_ARRIVAL_HORIZON_MS,
            time_scale,
            seed,
        }
    }

    /// Reject invalid configurations before a run ever starts.
    pub fn validate(&self) -> BnResult<()> {
        if self.window_length_ms == 0 {
            return Err(BnError::Config("window_length_ms must be positive".into()));
        }
        if self.transit_ms == 0 {
            return Err(BnError::Config("transit_ms must be positive".into()));
        }
        if self.arrival_horizon_ms == 0 {
            return Err(BnError::Config("arrival_horizon_ms must be positive".into()));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(BnError::Config(format!(
                "time_scale must be positive and finite, got {}",
                self.time_scale
            )));
        }
        // After scaling, durations must still be at least one logical
        // millisecond or the window/transit arithmetic degenerates.
        if self.scaled_window() == 0 || self.scaled_transit() == 0 || self.scaled_horizon() == 0 {
            return Err(BnError::Config(format!(
                "time_scale {} collapses a duration below 1 ms",
                self.time_scale
            )));
        }
        Ok(())
    }

    // ── Scaled accessors ──────────────────────────────────────────────────

    /// Window length on the logical clock.
    #[inline]
    pub fn scaled_window(&self) -> u64 {
        scale_ms(self.window_length_ms, self.time_scale)
    }

    /// Transit duration on the logical clock.
    #[inline]
    pub fn scaled_transit(&self) -> u64 {
        scale_ms(self.transit_ms, self.time_scale)
    }

    /// Arrival horizon on the logical clock.
    #[inline]
    pub fn scaled_horizon(&self) -> u64 {
        scale_ms(self.arrival_horizon_ms, self.time_scale)
    }
}

/// Round-to-nearest scaling, matching the original's millisecond rounding.
#[inline]
fn scale_ms(ms: u64, scale: f64) -> u64 {
    (ms as f64 * scale).round() as u64
}
