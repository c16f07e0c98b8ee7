//! `RulePolicy`: the numeric rule set applied on top of the band table.
//!
//! The band table says what is typical for an age; the policy says how the
//! deriver reacts to what actually happened today (short naps, early
//! starts, late naps).  [`RulePolicy::default`] is the canonical rule set.
//! Every duration is in minutes.

use nap_core::TimeOfDay;

/// Thresholds, fixed nap lengths, and adjustment factors used by the deriver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulePolicy {
    /// Waking before this switches on the early-wake warning.  Default 06:00.
    pub early_wake_before: TimeOfDay,

    /// Naps shorter than this did not release enough sleep pressure.
    /// Default 45.
    pub short_nap_below: u32,

    /// Multiplier applied to the next wake window after a too-short nap.
    /// Default 0.80.
    pub short_nap_wake_factor: f64,

    /// Length of a predicted nap.  Default 90.
    pub standard_nap: u32,

    /// Length of the final predicted nap in multi-nap bands.  Default 45.
    pub final_short_nap: u32,

    /// Length of a capped early nap.  Default 75.
    pub capped_nap: u32,

    /// A clock-mode nap is capped when the physiological ceiling lands at
    /// least this long before the clock anchor.  Default 30.
    pub capping_lead: u32,

    /// Added to the wake window after each predicted nap, up to the band's
    /// maximum.  Default 15.
    pub wake_window_step: u32,

    /// Total spread of the age adjustment to the bedtime wake window in
    /// window and hybrid bands: the youngest age in a band gets
    /// `-span/2`, the oldest `+span/2`.  Default 30.
    pub bedtime_age_span: u32,

    /// Multiplier applied to the bedtime wake window when the last nap
    /// carried a warning.  Default 0.90.
    pub warning_bedtime_factor: f64,

    /// Bedtimes before this are flagged as early.  Default 18:00.
    pub early_bedtime_before: TimeOfDay,

    /// Bedtimes after this are flagged as late.  Default 21:00.
    pub late_bedtime_after: TimeOfDay,

    /// Width of the target-bedtime range shown after a capped nap.
    /// Default 30.
    pub target_bedtime_range: u32,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            early_wake_before:      TimeOfDay::hm(6, 0),
            short_nap_below:        45,
            short_nap_wake_factor:  0.80,
            standard_nap:           90,
            final_short_nap:        45,
            capped_nap:             75,
            capping_lead:           30,
            wake_window_step:       15,
            bedtime_age_span:       30,
            warning_bedtime_factor: 0.90,
            early_bedtime_before:   TimeOfDay::hm(18, 0),
            late_bedtime_after:     TimeOfDay::hm(21, 0),
            target_bedtime_range:   30,
        }
    }
}

impl RulePolicy {
    /// Scale a duration by `factor`, rounded to the nearest minute.
    #[inline]
    pub fn scale(minutes: u32, factor: f64) -> u32 {
        (minutes as f64 * factor).round().max(0.0) as u32
    }

    /// The bedtime wake window's age correction for a band position in
    /// `[0, 1]`: `round(progress * span) - span / 2`, so `-span/2` at the
    /// lower bound and `+span/2` at the upper.
    pub fn bedtime_age_adjustment(&self, progress: f64) -> i64 {
        let span = self.bedtime_age_span as i64;
        (progress.clamp(0.0, 1.0) * span as f64).round() as i64 - span / 2
    }
}
