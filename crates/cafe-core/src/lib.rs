//! `cafe-core`: foundational types for the cafeteria simulation.
//!
//! This crate is a dependency of every other `cafe-*` crate.  It has no
//! `cafe-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `ProcessId`                                               |
//! | [`time`]      | `SimTime`, `Clock`                                        |
//! | [`station`]   | `Station`, `Course`                                       |
//! | [`config`]    | `RunConfig`, `UniformRange`, `Staffing`, `ServiceTimes`, `Routing` |
//! | [`rng`]       | `Stream`, `RandomVariateSource`, `SeededStreams`          |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config, time and ID types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod station;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Routing, RunConfig, ServiceTimes, Staffing, UniformRange, MIN_STEPS_PER_ACTIVATION};
pub use error::{CoreError, CoreResult};
pub use ids::ProcessId;
pub use rng::{RandomVariateSource, SeededStreams, Stream, StreamRng};
pub use station::{Course, Station};
pub use time::{Clock, SimTime};
