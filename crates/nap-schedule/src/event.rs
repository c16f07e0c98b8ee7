//! Output types: `PlannedEvent` and `DerivationResult`.
//!
//! Events come out in construction order, which is chronological: the wake
//! event, every nap (observed first, then predicted), then bedtime.

use std::fmt;

use nap_core::TimeOfDay;

use crate::AgeBand;

// ── EventKind ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EventKind {
    Wake,
    Nap,
    Bedtime,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Wake => "wake",
            EventKind::Nap => "nap",
            EventKind::Bedtime => "bedtime",
        })
    }
}

// ── Severity ──────────────────────────────────────────────────────────────────

/// How much attention an event needs.  Ordered `Normal < Warning < Critical`
/// so escalation is a `max`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        })
    }
}

// ── PlannedEvent ──────────────────────────────────────────────────────────────

/// One row of the derived day.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedEvent {
    pub kind: EventKind,
    pub start: TimeOfDay,
    /// Nap end, or the end of a target-bedtime range.
    pub end: Option<TimeOfDay>,
    pub title: String,
    pub description: String,
    pub reasoning: String,
    /// `false` for things that already happened (wake-up, logged naps).
    pub is_prediction: bool,
    /// `None` for the wake event.
    pub severity: Option<Severity>,
}

impl PlannedEvent {
    /// Minutes from start to end, if the event has an end.
    pub fn duration(&self) -> Option<u32> {
        self.end.map(|end| self.start.minutes_until(end))
    }

    pub fn severity_or_normal(&self) -> Severity {
        self.severity.unwrap_or_default()
    }
}

// ── DerivationResult ──────────────────────────────────────────────────────────

/// Everything one derivation produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivationResult {
    pub events: Vec<PlannedEvent>,
    /// Human-readable warnings in the order they were raised.
    pub warnings: Vec<String>,
    /// The band the child's age resolved to.
    pub band: AgeBand,
}

impl DerivationResult {
    /// All nap events, observed and predicted.
    pub fn naps(&self) -> impl Iterator<Item = &PlannedEvent> {
        self.events.iter().filter(|e| e.kind == EventKind::Nap)
    }

    pub fn predicted_naps(&self) -> impl Iterator<Item = &PlannedEvent> {
        self.naps().filter(|e| e.is_prediction)
    }

    pub fn bedtime(&self) -> Option<&PlannedEvent> {
        self.events.iter().rev().find(|e| e.kind == EventKind::Bedtime)
    }

    /// The most severe flag across all events.
    pub fn worst_severity(&self) -> Severity {
        self.events
            .iter()
            .filter_map(|e| e.severity)
            .max()
            .unwrap_or_default()
    }
}
