//! Age bands: the knowledge table the deriver reads.
//!
//! # Band model
//!
//! Each [`AgeBand`] covers an inclusive range of ages in months and carries
//! the wake-window bounds, nap count, and bedtime rules for that range.  A
//! [`BandTable`] is an ordered, gap-free partition of `[0, ∞)`:
//!
//! ```text
//! 0–3 | 4–6 | 7–9 | 10–14 | 15–24 | 25–60 (open-ended)
//! ```
//!
//! Lookup is by inclusive upper bound; ages past the last band's upper bound
//! fall into the last band.
//!
//! # Scheduling mode
//!
//! Young babies are scheduled purely by elapsed wake time (`window`).  Around
//! the middle of the first year naps start to settle at repeatable times
//! (`hybrid`).  Once circadian rhythm dominates, the nap is anchored to a
//! clock time (`clock`).  Only the `Clock` variant carries an anchor, so an
//! anchored `window` band cannot be built.

use std::fmt;

use nap_core::{MINUTES_PER_DAY, TimeOfDay};

use crate::{ScheduleError, ScheduleResult};

// ── SchedulingMode ────────────────────────────────────────────────────────────

/// How the nap slots of a band are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "lowercase"))]
pub enum SchedulingMode {
    /// Naps follow elapsed wake windows only.
    Window,
    /// Wake windows, with naps drifting toward repeatable times.
    Hybrid,
    /// The single nap is anchored to `nap_anchor`.
    Clock { nap_anchor: TimeOfDay },
}

impl SchedulingMode {
    /// The clock anchor, if this is a clock-mode band.
    pub fn nap_anchor(&self) -> Option<TimeOfDay> {
        match self {
            SchedulingMode::Clock { nap_anchor } => Some(*nap_anchor),
            _ => None,
        }
    }

    /// `true` for [`SchedulingMode::Clock`].
    pub fn is_clock(&self) -> bool {
        matches!(self, SchedulingMode::Clock { .. })
    }

    /// Lower-case name, as written in band CSV files.
    pub fn name(&self) -> &'static str {
        match self {
            SchedulingMode::Window => "window",
            SchedulingMode::Hybrid => "hybrid",
            SchedulingMode::Clock { .. } => "clock",
        }
    }
}

impl fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── AgeBand ───────────────────────────────────────────────────────────────────

/// Scheduling rules for one age range.  All durations are in minutes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgeBand {
    /// Youngest age in the band (inclusive).
    pub min_months: u32,
    /// Oldest age in the band (inclusive).  The last band of a table also
    /// accepts every older age.
    pub max_months: u32,
    /// Shortest wake window worth attempting a nap after.
    pub min_wake: u32,
    /// Longest wake window before overtiredness sets in.
    pub max_wake: u32,
    /// Target number of naps per day.
    pub naps: u32,
    pub mode: SchedulingMode,
    /// Wake window between the last nap and bedtime.
    pub bedtime_wake: u32,
    /// Naps longer than this start eating into night sleep.
    pub too_long_nap: u32,
    /// Naps ending later than this risk a late bedtime.
    pub latest_nap_end: Option<TimeOfDay>,
    pub ideal_bedtime: TimeOfDay,
    pub label: String,
    pub description: String,
}

impl AgeBand {
    /// Position of `months` within the band, clamped to `[0, 1]`.
    ///
    /// A single-month band reports `1.0`.
    pub fn age_progress(&self, months: u32) -> f64 {
        if self.max_months <= self.min_months {
            return 1.0;
        }
        let span = (self.max_months - self.min_months) as f64;
        (months.saturating_sub(self.min_months) as f64 / span).clamp(0.0, 1.0)
    }

    /// Today's wake window: `min_wake` at the band's lower bound, `max_wake`
    /// at its upper bound, linear in between, rounded to the minute.
    pub fn interpolated_wake_window(&self, months: u32) -> u32 {
        if self.max_months <= self.min_months {
            return self.max_wake;
        }
        let spread = self.max_wake.saturating_sub(self.min_wake) as f64;
        self.min_wake + (spread * self.age_progress(months)).round() as u32
    }

    /// `true` if `months` lies within the band's own bounds.  Ignores the
    /// open end of a table's last band.
    pub fn contains(&self, months: u32) -> bool {
        (self.min_months..=self.max_months).contains(&months)
    }
}

// ── BandTable ─────────────────────────────────────────────────────────────────

/// Upper bound on [`AgeBand::naps`] accepted by [`BandTable::new`].
pub const MAX_NAPS: u32 = 8;

/// An ordered, gap-free set of age bands.
///
/// Always holds at least one band.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BandTable {
    bands: Vec<AgeBand>,
}

impl BandTable {
    /// Validate and wrap `bands`.
    ///
    /// Bands are sorted by `min_months`; the first must start at 0 and each
    /// following band must start one month after the previous one ends.
    /// Every duration must be shorter than a day, and a band may hold at
    /// most [`MAX_NAPS`] naps.
    pub fn new(mut bands: Vec<AgeBand>) -> ScheduleResult<Self> {
        bands.sort_by_key(|b| b.min_months);

        let Some(first) = bands.first() else {
            return Err(ScheduleError::BandTable("no bands".into()));
        };
        if first.min_months != 0 {
            return Err(ScheduleError::BandTable(format!(
                "first band starts at {} months, expected 0",
                first.min_months
            )));
        }
        for band in &bands {
            if band.max_months < band.min_months {
                return Err(ScheduleError::BandTable(format!(
                    "band {:?} ends before it starts",
                    band.label
                )));
            }
            let durations = [
                ("min_wake", band.min_wake),
                ("max_wake", band.max_wake),
                ("bedtime_wake", band.bedtime_wake),
                ("too_long_nap", band.too_long_nap),
            ];
            if let Some((field, value)) = durations.iter().find(|(_, v)| *v >= MINUTES_PER_DAY) {
                return Err(ScheduleError::BandTable(format!(
                    "band {:?} has {field} {value}, expected under {MINUTES_PER_DAY} minutes",
                    band.label
                )));
            }
            if band.naps > MAX_NAPS {
                return Err(ScheduleError::BandTable(format!(
                    "band {:?} has {} naps, expected at most {MAX_NAPS}",
                    band.label, band.naps
                )));
            }
            if band.min_wake > band.max_wake {
                return Err(ScheduleError::BandTable(format!(
                    "band {:?} has min_wake {} > max_wake {}",
                    band.label, band.min_wake, band.max_wake
                )));
            }
        }
        for pair in bands.windows(2) {
            if pair[0].max_months.checked_add(1) != Some(pair[1].min_months) {
                return Err(ScheduleError::BandTable(format!(
                    "gap or overlap between {:?} (ends {}) and {:?} (starts {})",
                    pair[0].label, pair[0].max_months, pair[1].label, pair[1].min_months
                )));
            }
        }

        Ok(Self { bands })
    }

    /// The built-in six-band table.
    pub fn standard() -> Self {
        Self { bands: standard_bands() }
    }

    /// Read-only slice of all bands, youngest first.
    pub fn bands(&self) -> &[AgeBand] {
        &self.bands
    }

    /// The band for a child of `months` months.
    ///
    /// Finds the first band whose upper bound is `>= months`; older children
    /// use the last band.
    pub fn resolve(&self, months: u32) -> &AgeBand {
        let idx = self.bands.partition_point(|b| b.max_months < months);
        &self.bands[idx.min(self.bands.len() - 1)]
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ── Built-in table ────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn band(
    months:         (u32, u32),
    wake:           (u32, u32),
    naps:           u32,
    mode:           SchedulingMode,
    bedtime_wake:   u32,
    too_long_nap:   u32,
    latest_nap_end: Option<TimeOfDay>,
    ideal_bedtime:  TimeOfDay,
    label:          &str,
    description:    &str,
) -> AgeBand {
    AgeBand {
        min_months: months.0,
        max_months: months.1,
        min_wake: wake.0,
        max_wake: wake.1,
        naps,
        mode,
        bedtime_wake,
        too_long_nap,
        latest_nap_end,
        ideal_bedtime,
        label: label.to_string(),
        description: description.to_string(),
    }
}

fn standard_bands() -> Vec<AgeBand> {
    use SchedulingMode::{Clock, Hybrid, Window};
    let hm = TimeOfDay::hm;

    vec![
        band(
            (0, 3), (45, 90), 4, Window, 90, 150,
            None, hm(20, 0),
            "0–3 months",
            "Short wake windows and frequent naps; sleep is driven almost entirely by sleep pressure.",
        ),
        band(
            (4, 6), (90, 150), 3, Window, 150, 120,
            Some(hm(17, 30)), hm(19, 30),
            "4–6 months",
            "Three naps; the last one is a short bridge nap to reach bedtime.",
        ),
        band(
            (7, 9), (150, 210), 2, Hybrid, 210, 120,
            Some(hm(16, 30)), hm(19, 0),
            "7–9 months",
            "Two naps; wake windows lengthen and nap times begin to settle.",
        ),
        band(
            (10, 14), (180, 240), 2, Hybrid, 240, 150,
            Some(hm(16, 0)), hm(19, 0),
            "10–14 months",
            "Two naps with longer wake windows; some children start resisting the second nap.",
        ),
        band(
            (15, 24), (300, 360), 1, Clock { nap_anchor: hm(12, 30) }, 360, 150,
            Some(hm(15, 30)), hm(19, 30),
            "15–24 months",
            "One midday nap anchored to the clock rather than to elapsed wake time.",
        ),
        band(
            (25, 60), (300, 390), 1, Clock { nap_anchor: hm(13, 0) }, 330, 120,
            Some(hm(15, 0)), hm(19, 30),
            "25 months and up",
            "One early-afternoon nap, often dropped altogether by the end of the preschool years.",
        ),
    ]
}
