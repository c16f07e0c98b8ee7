//! Nap placement strategies.
//!
//! Every predicted nap slot is placed by exactly one strategy, chosen from
//! the band's mode, its nap count, and how many naps are already logged:
//!
//! | Strategy          | When                                                  |
//! |-------------------|-------------------------------------------------------|
//! | `CappedEarly`     | clock band, one nap, none logged, ceiling well before the anchor |
//! | `ClockAnchored`   | clock band, one nap, none logged, otherwise           |
//! | `WakeWindow`      | every other slot                                      |
//!
//! Placements work on an unwrapped minute count measured from midnight of
//! the wake day, so a nap pushed past midnight still compares as "late".

use nap_core::TimeOfDay;

use crate::{AgeBand, RulePolicy, Severity};

// ── Inputs and outputs ────────────────────────────────────────────────────────

/// Everything a strategy needs to place one slot.
#[derive(Clone, Copy, Debug)]
pub struct SlotContext<'a> {
    pub band:   &'a AgeBand,
    pub policy: &'a RulePolicy,
    /// When the child last woke up (unwrapped minutes).
    pub cursor: u32,
    /// The wake window in effect for this slot.
    pub wake_window: u32,
    /// Naps already logged today.
    pub observed: usize,
    /// Zero-based index of this nap in the day, counting logged naps.
    pub slot: u32,
}

/// Where and how long a predicted nap should be.
#[derive(Clone, Debug, PartialEq)]
pub struct NapPlacement {
    /// Unwrapped minutes since the wake day's midnight.
    pub start: u32,
    pub duration: u32,
    pub severity: Severity,
    pub reasoning: String,
    /// Appended to the result's warning list when present.
    pub warning: Option<String>,
    /// The child must be woken at the end of this nap.
    pub capped: bool,
}

impl NapPlacement {
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.duration
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// Nap at the clock anchor, clamped to the band's wake-window limits.
    ClockAnchored { anchor: TimeOfDay },
    /// Nap at the physiological ceiling, cut short to save bedtime.
    CappedEarly { anchor: TimeOfDay },
    /// Nap one wake window after the cursor.
    WakeWindow { final_short: bool },
}

impl PlacementStrategy {
    pub fn select(ctx: &SlotContext<'_>) -> Self {
        let band = ctx.band;
        if let Some(anchor) = band.mode.nap_anchor() {
            if band.naps == 1 && ctx.observed == 0 {
                let ceiling = ctx.cursor + band.max_wake;
                return if anchor.minutes() >= ceiling + ctx.policy.capping_lead {
                    PlacementStrategy::CappedEarly { anchor }
                } else {
                    PlacementStrategy::ClockAnchored { anchor }
                };
            }
        }
        let final_short = band.naps > 1 && ctx.slot + 1 == band.naps;
        PlacementStrategy::WakeWindow { final_short }
    }

    pub fn place(self, ctx: &SlotContext<'_>) -> NapPlacement {
        match self {
            PlacementStrategy::ClockAnchored { anchor } => place_clock_anchored(ctx, anchor),
            PlacementStrategy::CappedEarly { anchor } => place_capped_early(ctx, anchor),
            PlacementStrategy::WakeWindow { final_short } => place_by_wake_window(ctx, final_short),
        }
    }
}

// ── Strategies ────────────────────────────────────────────────────────────────

/// Start at the later of `cursor + min_wake` and the anchor, but never past
/// `cursor + max_wake`.
pub fn place_clock_anchored(ctx: &SlotContext<'_>, anchor: TimeOfDay) -> NapPlacement {
    let band = ctx.band;
    let earliest = ctx.cursor + band.min_wake;
    let ceiling = ctx.cursor + band.max_wake;
    let start = earliest.max(anchor.minutes()).min(ceiling);

    let reasoning = if start == ceiling && ceiling < anchor.minutes() {
        format!(
            "Held to {} so the wake window stays under {} h; the usual nap time is {anchor}.",
            clock(start),
            hours(band.max_wake),
        )
    } else if start == earliest && earliest > anchor.minutes() {
        format!(
            "Later than the usual {anchor} nap so the child has been awake at least {} h.",
            hours(band.min_wake),
        )
    } else {
        format!(
            "Anchored to the {anchor} midday nap; circadian rhythm now outweighs elapsed wake time.",
        )
    };

    NapPlacement {
        start,
        duration: ctx.policy.standard_nap,
        severity: Severity::Normal,
        reasoning,
        warning: None,
        capped: false,
    }
}

/// Start at `cursor + max_wake` and wake the child after the capped length.
pub fn place_capped_early(ctx: &SlotContext<'_>, anchor: TimeOfDay) -> NapPlacement {
    let band = ctx.band;
    let policy = ctx.policy;
    let start = ctx.cursor + band.max_wake;
    let lead = anchor.minutes().saturating_sub(start);

    NapPlacement {
        start,
        duration: policy.capped_nap,
        severity: Severity::Warning,
        reasoning: format!(
            "The early start reaches the {} h wake-window limit at {}, {lead} min before the usual \
             {anchor} nap. Start the nap then and wake the child after {} minutes so enough sleep \
             pressure builds for bedtime.",
            hours(band.max_wake),
            clock(start),
            policy.capped_nap,
        ),
        warning: Some(format!(
            "Early start: nap moved to {} and capped at {} minutes.",
            clock(start),
            policy.capped_nap,
        )),
        capped: true,
    }
}

/// Start one wake window after the cursor.
pub fn place_by_wake_window(ctx: &SlotContext<'_>, final_short: bool) -> NapPlacement {
    let policy = ctx.policy;
    let start = ctx.cursor + ctx.wake_window;
    let (duration, reasoning) = if final_short {
        (
            policy.final_short_nap,
            format!(
                "{} h wake window since the last sleep. Kept short as the last nap of the day so \
                 it bridges to bedtime without taking night sleep.",
                hours(ctx.wake_window),
            ),
        )
    } else {
        (
            policy.standard_nap,
            format!("{} h wake window since the last sleep.", hours(ctx.wake_window)),
        )
    };

    NapPlacement {
        start,
        duration,
        severity: Severity::Normal,
        reasoning,
        warning: None,
        capped: false,
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// `HH:MM` for an unwrapped minute count.
pub(crate) fn clock(minutes: u32) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes as i64)
}

/// Minutes as hours without trailing zeros: 90 → "1.5", 75 → "1.25", 360 → "6".
pub(crate) fn hours(minutes: u32) -> String {
    let formatted = format!("{:.2}", minutes as f64 / 60.0);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}
