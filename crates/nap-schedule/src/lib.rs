//! `nap-schedule`: age bands, nap log, and the rest-of-day schedule deriver.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`band`]      | `AgeBand`, `SchedulingMode`, `BandTable`                      |
//! | [`policy`]    | `RulePolicy` (thresholds, nap lengths, adjustment factors)    |
//! | [`nap_log`]   | `ObservedNap`, `NapLog`, `NapDraft`, pure list edits          |
//! | [`event`]     | `PlannedEvent`, `EventKind`, `Severity`, `DerivationResult`   |
//! | [`strategy`]  | `PlacementStrategy` and the per-slot placement functions      |
//! | [`derive`]    | `Deriver`, `derive_schedule`, `derive_schedule_str`           |
//! | [`loader`]    | `load_naps_csv`, `load_bands_csv` and their reader variants   |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                          |
//!
//! # Derivation model (summary)
//!
//! Given an age in months, a wake time, and the naps logged so far:
//!
//! ```text
//! band          = first band with max_months ≥ age (or the last band)
//! wake_window   = lerp(band.min_wake, band.max_wake, age progress in band)
//! events        = wake, logged naps, predicted naps, bedtime
//! ```
//!
//! Each event carries reasoning text and a severity; anything unusual is
//! also collected into the result's warning list.

pub mod band;
pub mod derive;
pub mod error;
pub mod event;
pub mod loader;
pub mod nap_log;
pub mod policy;
pub mod strategy;


pub use band::{AgeBand, BandTable, MAX_NAPS, SchedulingMode};
pub use derive::{derive_schedule, derive_schedule_str, Deriver};
pub use error::{ScheduleError, ScheduleResult};
pub use event::{DerivationResult, EventKind, PlannedEvent, Severity};
pub use loader::{load_bands_csv, load_bands_reader, load_naps_csv, load_naps_reader};
pub use nap_log::{add_observed_nap, remove_observed_nap, NapDraft, NapLog, ObservedNap};
pub use policy::RulePolicy;
pub use strategy::{NapPlacement, PlacementStrategy, SlotContext};
