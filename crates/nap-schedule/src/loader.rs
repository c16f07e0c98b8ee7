//! CSV loaders for nap logs and band tables.
//!
//! # Nap log format
//!
//! One row per observed nap.  Rows with a blank field are skipped, the same
//! as a blank entry in [`NapLog::add`].
//!
//! ```csv
//! start,end
//! 09:10,10:25
//! 13:00,13:20
//! ```
//!
//! # Band table format
//!
//! One row per band.  `mode` is `window`, `hybrid`, or `clock`; `nap_anchor`
//! is required for `clock` and must be empty otherwise.  `latest_nap_end`
//! may be empty.
//!
//! ```csv
//! min_months,max_months,min_wake,max_wake,naps,mode,nap_anchor,bedtime_wake,too_long_nap,latest_nap_end,ideal_bedtime,label,description
//! 0,11,60,180,3,window,,150,120,17:30,19:30,Baby,Wake-window naps
//! 12,60,300,360,1,clock,12:30,360,150,15:30,19:30,Toddler,One midday nap
//! ```
//!
//! The loaded table goes through [`BandTable::new`], so gaps and overlaps
//! are rejected.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use nap_core::TimeOfDay;

use crate::{AgeBand, BandTable, NapLog, ScheduleError, ScheduleResult, SchedulingMode};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NapRecord {
    start: String,
    end:   String,
}

#[derive(Deserialize)]
struct BandRecord {
    min_months:     u32,
    max_months:     u32,
    min_wake:       u32,
    max_wake:       u32,
    naps:           u32,
    mode:           String,
    nap_anchor:     String,
    bedtime_wake:   u32,
    too_long_nap:   u32,
    latest_nap_end: String,
    ideal_bedtime:  String,
    label:          String,
    description:    String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a nap log from a CSV file.
pub fn load_naps_csv(path: &Path) -> ScheduleResult<NapLog> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_naps_reader(file)
}

/// Like [`load_naps_csv`] but accepts any `Read` source.
pub fn load_naps_reader<R: Read>(reader: R) -> ScheduleResult<NapLog> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut log = NapLog::new();

    for result in csv_reader.deserialize::<NapRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        log.add(&row.start, &row.end)?;
    }

    Ok(log)
}

/// Load a band table from a CSV file.
pub fn load_bands_csv(path: &Path) -> ScheduleResult<BandTable> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_bands_reader(file)
}

/// Like [`load_bands_csv`] but accepts any `Read` source.
pub fn load_bands_reader<R: Read>(reader: R) -> ScheduleResult<BandTable> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let bands = csv_reader
        .deserialize::<BandRecord>()
        .map(|result| {
            let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
            band_from_record(row)
        })
        .collect::<ScheduleResult<Vec<AgeBand>>>()?;

    BandTable::new(bands)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn band_from_record(r: BandRecord) -> ScheduleResult<AgeBand> {
    let anchor = optional_time(&r.nap_anchor)?;
    let mode = match (r.mode.as_str(), anchor) {
        ("window", None) => SchedulingMode::Window,
        ("hybrid", None) => SchedulingMode::Hybrid,
        ("clock", Some(nap_anchor)) => SchedulingMode::Clock { nap_anchor },
        ("clock", None) => {
            return Err(ScheduleError::Parse(format!(
                "band {:?}: clock mode needs a nap_anchor",
                r.label
            )));
        }
        ("window" | "hybrid", Some(_)) => {
            return Err(ScheduleError::Parse(format!(
                "band {:?}: nap_anchor is only valid in clock mode",
                r.label
            )));
        }
        (other, _) => {
            return Err(ScheduleError::Parse(format!(
                "invalid mode {other:?}: expected \"window\", \"hybrid\", or \"clock\""
            )));
        }
    };

    Ok(AgeBand {
        min_months:     r.min_months,
        max_months:     r.max_months,
        min_wake:       r.min_wake,
        max_wake:       r.max_wake,
        naps:           r.naps,
        mode,
        bedtime_wake:   r.bedtime_wake,
        too_long_nap:   r.too_long_nap,
        latest_nap_end: optional_time(&r.latest_nap_end)?,
        ideal_bedtime:  r.ideal_bedtime.parse()?,
        label:          r.label,
        description:    r.description,
    })
}

fn optional_time(s: &str) -> ScheduleResult<Option<TimeOfDay>> {
    if s.is_empty() {
        Ok(None)
    } else {
        Ok(Some(s.parse()?))
    }
}
