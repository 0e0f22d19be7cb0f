use bn_core::{BnError, Tick, VehicleId};
use thiserror::Error;

/// Errors surfaced by the simulation engine.
///
/// Everything except `Core` (configuration rejection at construction) is an
/// internal-consistency fault: it indicates a broken mutual-exclusion or
/// accounting guarantee and aborts the run rather than letting it produce a
/// wrong statistic.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] BnError),

    #[error("crossing segment already holds {occupant} when admitting {admitted} at {at}")]
    SegmentOccupied {
        occupant: VehicleId,
        admitted: VehicleId,
        at:       Tick,
    },

    #[error("crossing segment empty on departure at {at}")]
    SegmentEmpty { at: Tick },

    #[error("vehicle {vehicle} completed transit without ever being queued")]
    NeverQueued { vehicle: VehicleId },

    #[error("vehicle {vehicle} would record a negative wait at {at}")]
    NegativeWait { vehicle: VehicleId, at: Tick },

    #[error("event queue empty at {at} with unretired workers — engine stalled")]
    Stalled { at: Tick },
}

pub type SimResult<T> = Result<T, SimError>;
