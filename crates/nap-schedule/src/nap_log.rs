//! The caller's nap log: observed naps kept sorted by start time.
//!
//! Two interfaces over the same rules:
//!
//! - [`add_observed_nap`] / [`remove_observed_nap`] take a slice and return
//!   a new `Vec`, leaving the input untouched.
//! - [`NapLog`] mutates in place and owns identifier allocation.
//!
//! Either way a blank start or end makes the add a no-op, and the list is
//! re-sorted by start time after every insert.  Nothing else is validated:
//! overlapping or out-of-order naps are the caller's business.

use nap_core::{NapId, TimeOfDay};

use crate::ScheduleResult;

// ── ObservedNap ───────────────────────────────────────────────────────────────

/// A nap that already happened today.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedNap {
    pub id: NapId,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// `end - start` in minutes, wrapped past midnight; always `< 1440`.
    pub duration: u32,
}

impl ObservedNap {
    pub fn new(id: NapId, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { id, start, end, duration: start.minutes_until(end) }
    }
}

// ── NapDraft ──────────────────────────────────────────────────────────────────

/// Staged input fields of a nap entry form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NapDraft {
    pub start: String,
    pub end: String,
}

impl NapDraft {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { start: start.into(), end: end.into() }
    }

    /// `true` if either field is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.start.trim().is_empty() || self.end.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.start.clear();
        self.end.clear();
    }
}

// ── Pure list edits ───────────────────────────────────────────────────────────

/// A copy of `list` with one more nap, sorted by start time.
///
/// Blank `start` or `end` returns the list unchanged.  Malformed times are
/// an error.
pub fn add_observed_nap(
    list: &[ObservedNap],
    start: &str,
    end: &str,
) -> ScheduleResult<Vec<ObservedNap>> {
    let mut naps = list.to_vec();
    insert_nap(&mut naps, start, end)?;
    Ok(naps)
}

/// A copy of `list` without the nap identified by `id`.
pub fn remove_observed_nap(list: &[ObservedNap], id: NapId) -> Vec<ObservedNap> {
    list.iter().filter(|n| n.id != id).copied().collect()
}

/// Insert into `naps` and re-sort.  Returns the new id, or `None` for a
/// blank no-op.
fn insert_nap(naps: &mut Vec<ObservedNap>, start: &str, end: &str) -> ScheduleResult<Option<NapId>> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Ok(None);
    }
    let start: TimeOfDay = start.parse()?;
    let end: TimeOfDay = end.parse()?;

    let id = naps
        .iter()
        .map(|n| n.id)
        .max()
        .map_or(NapId::FIRST, NapId::next);

    naps.push(ObservedNap::new(id, start, end));
    // Stable: naps with equal start times keep insertion order.
    naps.sort_by_key(|n| n.start);
    Ok(Some(id))
}

// ── NapLog ────────────────────────────────────────────────────────────────────

/// An in-place nap log.  `&mut self` on every edit gives the single-writer
/// access the log needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NapLog {
    naps: Vec<ObservedNap>,
}

impl NapLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a nap from raw `"HH:MM"` text.
    ///
    /// Returns `Ok(None)` without touching the log if either field is blank.
    pub fn add(&mut self, start: &str, end: &str) -> ScheduleResult<Option<NapId>> {
        insert_nap(&mut self.naps, start, end)
    }

    /// Add the nap staged in `draft` and clear the draft.
    ///
    /// The draft is left as-is on a blank no-op or a parse error so the
    /// caller can show what was typed.
    pub fn commit_draft(&mut self, draft: &mut NapDraft) -> ScheduleResult<Option<NapId>> {
        let id = self.add(&draft.start, &draft.end)?;
        if id.is_some() {
            draft.clear();
        }
        Ok(id)
    }

    /// Remove the nap with `id`.  Returns `false` if no such nap exists.
    pub fn remove(&mut self, id: NapId) -> bool {
        let before = self.naps.len();
        self.naps.retain(|n| n.id != id);
        self.naps.len() != before
    }

    /// Read-only slice of all naps, sorted by start time.
    pub fn naps(&self) -> &[ObservedNap] {
        &self.naps
    }

    pub fn len(&self) -> usize {
        self.naps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.naps.is_empty()
    }
}
