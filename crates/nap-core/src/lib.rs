//! `nap-core`: foundational types for the nap schedule deriver.
//!
//! This crate is a dependency of every other `nap-*` crate.  It has no
//! `nap-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `NapId`                                                   |
//! | [`time`]        | `TimeOfDay`, `time_to_minutes`, `minutes_to_time`, …      |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::NapId;
pub use time::{
    add_minutes, duration_between, minutes_to_time, time_to_minutes, TimeOfDay, MINUTES_PER_DAY,
};
