//! The crossing segment: the shared, capacity-1 resource.

use bn_core::{Tick, VehicleId};

use crate::{SimError, SimResult};

/// Models the physically restricted roadway.
///
/// Holds at most one vehicle at any instant; a vehicle occupies it for
/// exactly the configured transit duration.  Only the lock-holding worker
/// ever calls [`admit`][CrossingSegment::admit], so a double occupancy here
/// means the arbiter's mutual exclusion is broken — that is a fatal fault,
/// not a recoverable condition.
pub struct CrossingSegment {
    /// Scaled transit duration in logical milliseconds.
    transit: u64,
    occupant: Option<VehicleId>,
}

impl CrossingSegment {
    pub fn new(transit_ms: u64) -> Self {
        Self {
            transit: transit_ms,
            occupant: None,
        }
    }

    /// Admit `vehicle` at `now`; returns the tick at which it departs.
    pub fn admit(&mut self, vehicle: VehicleId, now: Tick) -> SimResult<Tick> {
        if let Some(occupant) = self.occupant {
            return Err(SimError::SegmentOccupied {
                occupant,
                admitted: vehicle,
                at: now,
            });
        }
        self.occupant = Some(vehicle);
        Ok(now.offset(self.transit))
    }

    /// Release the current occupant at the end of its transit.
    pub fn depart(&mut self, now: Tick) -> SimResult<VehicleId> {
        self.occupant
            .take()
            .ok_or(SimError::SegmentEmpty { at: now })
    }

    /// The vehicle currently in transit, if any.
    #[inline]
    pub fn occupant(&self) -> Option<VehicleId> {
        self.occupant
    }

    /// Scaled transit duration.
    #[inline]
    pub fn transit_ms(&self) -> u64 {
        self.transit
    }
}
