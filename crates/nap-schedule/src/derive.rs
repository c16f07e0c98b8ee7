//! The schedule deriver.
//!
//! # Algorithm
//!
//! ```text
//! band, wake_window   = resolve(age), interpolate(age)
//! emit wake
//! for nap in observed (by start):   classify, emit, cursor = nap.end
//! remaining           = max(0, band.naps - observed)
//! for slot in remaining:            strategy(slot).place(), emit, cursor = nap.end, widen
//! bedtime             = cursor + bedtime_window(band, age, last nap)
//! ```
//!
//! The cursor is threaded through two folds as part of [`DayState`]; no
//! state outlives a call, so [`Deriver::derive`] is pure and may be called
//! from any number of threads at once.
//!
//! The cursor counts minutes from midnight of the wake day without wrapping.
//! Events render it modulo one day, while the late-nap and late-bedtime
//! checks compare the unwrapped value.

use std::sync::LazyLock;

use nap_core::{MINUTES_PER_DAY, TimeOfDay, time_to_minutes};
use tracing::{debug, trace};

use crate::strategy::{clock, hours};
use crate::{
    AgeBand, BandTable, DerivationResult, EventKind, ObservedNap, PlacementStrategy, PlannedEvent,
    RulePolicy, ScheduleResult, Severity, SlotContext, add_observed_nap,
};

static STANDARD: LazyLock<Deriver> = LazyLock::new(Deriver::default);

/// Derive today's schedule with the built-in band table and rule policy.
pub fn derive_schedule(age_months: u32, wake: TimeOfDay, naps: &[ObservedNap]) -> DerivationResult {
    STANDARD.derive(age_months, wake, naps)
}

/// [`derive_schedule`] for callers holding raw `"HH:MM"` text.
///
/// A blank wake time means midnight.  Nap pairs with a blank field are
/// skipped; malformed times are an error.
pub fn derive_schedule_str(
    age_months: u32,
    wake: &str,
    naps: &[(&str, &str)],
) -> ScheduleResult<DerivationResult> {
    let wake = TimeOfDay::from_minutes(time_to_minutes(wake)? as i64);
    let log = naps
        .iter()
        .try_fold(Vec::new(), |log, (start, end)| add_observed_nap(&log, start, end))?;
    Ok(derive_schedule(age_months, wake, &log))
}

/// A nap logged before the wake time happened after midnight.
fn unwrapped_start(wake: TimeOfDay, nap: &ObservedNap) -> u32 {
    if nap.start < wake {
        nap.start.minutes() + MINUTES_PER_DAY
    } else {
        nap.start.minutes()
    }
}

// ── Deriver ───────────────────────────────────────────────────────────────────

/// A band table paired with a rule policy.
#[derive(Clone, Debug, Default)]
pub struct Deriver {
    table:  BandTable,
    policy: RulePolicy,
}

/// The most recent nap, as far as later rules care.
#[derive(Copy, Clone, Debug)]
struct LastNap {
    severity:  Severity,
    duration:  u32,
    too_short: bool,
    capped:    bool,
}

/// Accumulator threaded through the observed and predicted folds.
struct DayState {
    cursor:      u32,
    wake_window: u32,
    nap_count:   u32,
    last_nap:    Option<LastNap>,
    events:      Vec<PlannedEvent>,
    warnings:    Vec<String>,
}

impl Deriver {
    pub fn new(table: BandTable, policy: RulePolicy) -> Self {
        Self { table, policy }
    }

    pub fn table(&self) -> &BandTable {
        &self.table
    }

    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    /// Derive the rest of the day for a child of `age_months` who woke at
    /// `wake` and has already napped `observed`.
    pub fn derive(&self, age_months: u32, wake: TimeOfDay, observed: &[ObservedNap]) -> DerivationResult {
        let band = self.table.resolve(age_months);
        let policy = &self.policy;
        let wake_window = band.interpolated_wake_window(age_months);
        debug!(age_months, band = %band.label, mode = %band.mode, wake_window, "resolved age band");

        let mut state = DayState {
            cursor: wake.minutes(),
            wake_window,
            nap_count: 0,
            last_nap: None,
            events: vec![PlannedEvent {
                kind: EventKind::Wake,
                start: wake,
                end: None,
                title: "Wake up".into(),
                description: format!("Morning wake-up at {wake}."),
                reasoning: format!(
                    "Start of the day. At {} months the wake window is about {} h.",
                    age_months,
                    hours(wake_window),
                ),
                is_prediction: false,
                severity: None,
            }],
            warnings: Vec::new(),
        };

        if wake < policy.early_wake_before {
            state.warnings.push(format!(
                "Woke at {wake}, before {}: early-wake mitigation is in effect.",
                policy.early_wake_before,
            ));
        }

        // ── Observed naps ─────────────────────────────────────────────────
        let mut sorted = observed.to_vec();
        sorted.sort_by_key(|n| unwrapped_start(wake, n));
        let observed_count = sorted.len();
        let state = sorted
            .iter()
            .fold(state, |state, nap| self.record_observed(band, wake, state, nap));

        // ── Predicted naps ────────────────────────────────────────────────
        let remaining = band.naps.saturating_sub(observed_count as u32);
        let mut state = state;
        if remaining > 0 {
            if let Some(last) = state.last_nap.filter(|l| l.too_short) {
                let reduced = RulePolicy::scale(state.wake_window, policy.short_nap_wake_factor);
                state.warnings.push(format!(
                    "The last nap lasted only {} min, so the next wake window is shortened from {} \
                     to {} min.",
                    last.duration, state.wake_window, reduced,
                ));
                state.wake_window = reduced;
            }
        }
        let state = (0..remaining).fold(state, |state, i| {
            self.predict_nap(band, observed_count, observed_count as u32 + i, state)
        });

        self.finish_with_bedtime(band, age_months, state)
    }

    /// Classify one logged nap and advance the cursor past it.
    fn record_observed(&self, band: &AgeBand, wake: TimeOfDay, mut state: DayState, nap: &ObservedNap) -> DayState {
        let policy = &self.policy;
        let too_short = nap.duration < policy.short_nap_below;
        let too_long = nap.duration > band.too_long_nap;

        let (severity, reasoning) = if too_short {
            (
                Severity::Warning,
                format!(
                    "Only {} min, under the {} min needed to finish a sleep cycle. Sleep pressure \
                     was only partly released, so the child will tire sooner.",
                    nap.duration, policy.short_nap_below,
                ),
            )
        } else if too_long {
            (
                Severity::Warning,
                format!(
                    "{} min is over the {} min limit for this age. A long nap steals sleep \
                     pressure from the night and can push bedtime later.",
                    nap.duration, band.too_long_nap,
                ),
            )
        } else {
            (
                Severity::Normal,
                format!("{} min: a restorative nap for this age.", nap.duration),
            )
        };

        state.nap_count += 1;
        state.events.push(PlannedEvent {
            kind: EventKind::Nap,
            start: nap.start,
            end: Some(nap.end),
            title: format!("Nap {}", state.nap_count),
            description: format!("Logged nap, {} min.", nap.duration),
            reasoning,
            is_prediction: false,
            severity: Some(severity),
        });

        state.cursor = unwrapped_start(wake, nap) + nap.duration;
        state.last_nap = Some(LastNap { severity, duration: nap.duration, too_short, capped: false });
        state
    }

    /// Place one predicted slot, check it against the latest nap end, and
    /// widen the wake window for the next one.
    fn predict_nap(&self, band: &AgeBand, observed: usize, slot: u32, mut state: DayState) -> DayState {
        let policy = &self.policy;
        let ctx = SlotContext {
            band,
            policy,
            cursor: state.cursor,
            wake_window: state.wake_window,
            observed,
            slot,
        };
        let strategy = PlacementStrategy::select(&ctx);
        let mut placement = strategy.place(&ctx);
        trace!(slot, ?strategy, start = %clock(placement.start), duration = placement.duration, "placed nap");

        if let Some(warning) = placement.warning.take() {
            state.warnings.push(warning);
        }

        state.nap_count += 1;
        if let Some(latest) = band.latest_nap_end {
            if placement.end() > latest.minutes() {
                placement.severity = placement.severity.max(Severity::Warning);
                placement.reasoning.push_str(&format!(
                    " Ends after {latest}, which risks delaying bedtime.",
                ));
                state.warnings.push(format!(
                    "Nap {} would end at {}, after {latest}; bedtime is likely to run late.",
                    state.nap_count,
                    clock(placement.end()),
                ));
            }
        }

        let title = if placement.capped {
            format!("Nap {} (capped)", state.nap_count)
        } else {
            format!("Nap {}", state.nap_count)
        };
        let description = if placement.capped {
            format!(
                "Predicted nap. Wake the child at {}, after {} min.",
                clock(placement.end()),
                placement.duration,
            )
        } else {
            format!("Predicted nap, about {} min.", placement.duration)
        };

        let end = placement.end();
        state.events.push(PlannedEvent {
            kind: EventKind::Nap,
            start: clock(placement.start),
            end: Some(clock(end)),
            title,
            description,
            reasoning: placement.reasoning,
            is_prediction: true,
            severity: Some(placement.severity),
        });

        state.cursor = end;
        state.wake_window = (state.wake_window + policy.wake_window_step).min(band.max_wake);
        state.last_nap = Some(LastNap {
            severity:  placement.severity,
            duration:  placement.duration,
            too_short: false,
            capped:    placement.capped,
        });
        state
    }

    /// Append the bedtime event and package the result.
    fn finish_with_bedtime(&self, band: &AgeBand, age_months: u32, mut state: DayState) -> DerivationResult {
        let policy = &self.policy;

        let mut window = if band.mode.is_clock() {
            band.bedtime_wake
        } else {
            let adjustment = policy.bedtime_age_adjustment(band.age_progress(age_months));
            (band.bedtime_wake as i64 + adjustment).max(0) as u32
        };

        let mut notes = Vec::new();
        let target = matches!(state.last_nap, Some(LastNap { capped: true, .. }));
        if target {
            window = band.max_wake;
            notes.push("After a capped nap the full wake window is used before bed.".to_string());
        } else if state.last_nap.is_some_and(|l| l.severity >= Severity::Warning) {
            window = RulePolicy::scale(window, policy.warning_bedtime_factor);
            notes.push("Shortened because the last nap was flagged.".to_string());
        }

        let bedtime = state.cursor + window;
        let severity = if bedtime < policy.early_bedtime_before.minutes() {
            notes.push("Early bedtime compensates for the early start.".to_string());
            state.warnings.push(format!(
                "Bedtime at {} is before {}, compensating for an early start.",
                clock(bedtime),
                policy.early_bedtime_before,
            ));
            Severity::Warning
        } else if bedtime > policy.late_bedtime_after.minutes() {
            notes.push("Late bedtime: watch for overtiredness.".to_string());
            state.warnings.push(format!(
                "Bedtime at {} is after {}; the child may become overtired.",
                clock(bedtime),
                policy.late_bedtime_after,
            ));
            Severity::Critical
        } else {
            Severity::Normal
        };
        debug!(bedtime = %clock(bedtime), window, ?severity, "derived bedtime");

        let mut reasoning = format!("{} h of wake time after the last sleep.", hours(window));
        for note in notes {
            reasoning.push(' ');
            reasoning.push_str(&note);
        }

        let start = clock(bedtime);
        let event = if target {
            let end = clock(bedtime + policy.target_bedtime_range);
            PlannedEvent {
                kind: EventKind::Bedtime,
                start,
                end: Some(end),
                title: "Target bedtime".into(),
                description: format!("Aim for lights out between {start} and {end}."),
                reasoning,
                is_prediction: true,
                severity: Some(severity),
            }
        } else {
            PlannedEvent {
                kind: EventKind::Bedtime,
                start,
                end: None,
                title: "Bedtime".into(),
                description: format!(
                    "Lights out at {start}. Typical for this age is around {}.",
                    band.ideal_bedtime,
                ),
                reasoning,
                is_prediction: true,
                severity: Some(severity),
            }
        };
        state.events.push(event);

        DerivationResult {
            events:   state.events,
            warnings: state.warnings,
            band:     band.clone(),
        }
    }
}
