//! `bn-core` — foundational types for the single-lane bottleneck simulator.
//!
//! This crate is a dependency of every other `bn-*` crate.  It intentionally
//! has no `bn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                        |
//! |---------------|-------------------------------------------------|
//! | [`time`]      | `Tick` — logical millisecond clock value        |
//! | [`direction`] | `Direction` — the two contending traffic flows  |
//! | [`vehicle`]   | `VehicleId`, `Vehicle`                          |
//! | [`config`]    | `RunConfig` + construction-time validation      |
//! | [`rng`]       | `SimRng` — seeded, reproducible randomness      |
//! | [`error`]     | `BnError`, `BnResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod direction;
pub mod error;
pub mod rng;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RunConfig;
pub use direction::Direction;
pub use error::{BnError, BnResult};
pub use rng::SimRng;
pub use time::Tick;
pub use vehicle::{Vehicle, VehicleId};
