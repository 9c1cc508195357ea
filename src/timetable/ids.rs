//! Identifier allocation for generated rows and form submissions.
//!
//! Row IDs are scoped by a time-bucket prefix (`YYYYMMDD-HHMM`) with a
//! 6-digit running number; form IDs are a global 6-digit sequence. The "last
//! used" values come from the database manager; callers must hold the
//! submission lock across the read-then-persist sequence so concurrent
//! submissions cannot allocate overlapping blocks.

use chrono::{DateTime, Local};

/// Running-number base for a fresh time bucket; the first allocated row ID
/// ends in 100001.
pub const ROW_RUNNING_BASE: i64 = 100_000;

/// Form-ID base when no submissions exist; the first allocated form ID is
/// 900001.
pub const FORM_ID_BASE: i64 = 900_000;

/// Formats the time-bucket prefix for row IDs, e.g. `20260209-1430`.
pub fn time_bucket_prefix(now: &DateTime<Local>) -> String {
    now.format("%Y%m%d-%H%M").to_string()
}

/// Parses the running number out of a row ID (the last `-`-delimited
/// segment). Returns `None` when the segment is not numeric.
pub fn running_number(row_id: &str) -> Option<i64> {
    row_id.rsplit('-').next()?.parse().ok()
}

/// Allocates `count` sequential row IDs under `prefix`, continuing from
/// `last_running`.
pub fn row_ids(prefix: &str, last_running: i64, count: usize) -> Vec<String> {
    let start = last_running + 1;
    (start..start + count as i64)
        .map(|n| format!("{prefix}-{n:06}"))
        .collect()
}

/// Allocates a contiguous block of `count` form IDs, continuing from
/// `last_form_id`.
pub fn form_ids(last_form_id: i64, count: usize) -> Vec<String> {
    let start = last_form_id + 1;
    (start..start + count as i64)
        .map(|n| format!("{n:06}"))
        .collect()
}
