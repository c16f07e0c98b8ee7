//! today: walk-through of the nap schedule deriver.
//!
//! Plays the part of the entry form: loads the naps logged so far from an
//! embedded CSV, stages and commits one more nap the way a form would, then
//! derives and prints the rest of the day for a 10-month-old who woke at
//! 06:15.  Set `RUST_LOG=nap_schedule=trace` to watch each placement.

use std::io::Cursor;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nap_core::TimeOfDay;
use nap_schedule::{NapDraft, Severity, derive_schedule, load_naps_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGE_MONTHS: u32 = 10;
const WAKE_TIME:  &str = "06:15";

// ── Nap log CSV ───────────────────────────────────────────────────────────────

// One short morning nap so far.
const NAPS_CSV: &str = "\
start,end\n\
09:20,09:50\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== today: nap schedule deriver ===");
    println!("Age: {AGE_MONTHS} months  |  Woke: {WAKE_TIME}");
    println!();

    // 1. Load what the form already holds.
    let mut log = load_naps_reader(Cursor::new(NAPS_CSV))?;
    info!(naps = log.len(), "loaded nap log");

    // 2. A blank draft is ignored; a filled one is committed and cleared.
    let mut draft = NapDraft::new("", "");
    log.commit_draft(&mut draft)?;
    let mut draft = NapDraft::new("06:40", "06:55");
    if let Some(id) = log.commit_draft(&mut draft)? {
        info!(%id, "committed draft");
    }
    // Changed our mind about the dawn catnap.
    if let Some(first) = log.naps().first().map(|n| n.id) {
        log.remove(first);
    }

    // 3. Derive.
    let wake: TimeOfDay = WAKE_TIME.parse()?;
    let result = derive_schedule(AGE_MONTHS, wake, log.naps());
    println!("Band: {} ({} mode, {} naps)", result.band.label, result.band.mode, result.band.naps);
    println!();

    // 4. Event table.
    println!("{:<7} {:<7} {:<18} {:<9} {}", "Start", "End", "Event", "Flag", "Why");
    println!("{}", "-".repeat(72));
    for event in &result.events {
        let end = event.end.map(|e| e.to_string()).unwrap_or_default();
        let flag = match event.severity_or_normal() {
            Severity::Normal => "",
            Severity::Warning => "warning",
            Severity::Critical => "CRITICAL",
        };
        let title = if event.is_prediction {
            event.title.clone()
        } else {
            format!("{} *", event.title)
        };
        println!("{:<7} {:<7} {:<18} {:<9} {}", event.start, end, title, flag, event.reasoning);
    }
    println!("(* already happened)");
    println!();

    if !result.warnings.is_empty() {
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  - {warning}");
        }
        println!();
    }

    // 5. Machine-readable form for a renderer.
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
