//! Plain data row types written by the CSV reporter.

use bn_core::RunConfig;
use bn_sim::{CompletedVehicle, RunSummary};

/// One completed vehicle's wait record.
///
/// Tick columns are on the logical (scaled) clock; `wait_ms` is likewise
/// scaled — the run summary carries the real-unit aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleWaitRow {
    pub vehicle_id: u32,
    pub direction:  &'static str,
    pub arrival_ms: u64,
    pub queued_ms:  u64,
    pub departed_ms: u64,
    pub wait_ms:    u64,
}

impl From<&CompletedVehicle> for VehicleWaitRow {
    fn from(record: &CompletedVehicle) -> Self {
        Self {
            vehicle_id:  record.id.0,
            direction:   record.direction.as_str(),
            arrival_ms:  record.arrival.0,
            queued_ms:   record.queued_at.0,
            departed_ms: record.departed.0,
            wait_ms:     record.wait,
        }
    }
}

/// One run's configuration and headline statistics, in real units.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummaryRow {
    pub window_length_ms: u64,
    pub seed:             u64,
    pub time_scale:       f64,
    pub completed:        u64,
    pub average_wait_ms:  f64,
    pub max_wait_ms:      f64,
    pub windows_north:    u64,
    pub windows_south:    u64,
    pub final_tick_ms:    u64,
}

impl RunSummaryRow {
    pub fn new(config: &RunConfig, summary: &RunSummary) -> Self {
        Self {
            window_length_ms: config.window_length_ms,
            seed:             config.seed,
            time_scale:       config.time_scale,
            completed:        summary.completed as u64,
            average_wait_ms:  summary.average_wait_ms,
            max_wait_ms:      summary.max_wait_ms,
            windows_north:    summary.windows_held[0],
            windows_south:    summary.windows_held[1],
            final_tick_ms:    summary.final_tick.0,
        }
    }
}
