//! Human-readable rendering of corrected snapshots.
//!
//! Pure functions over [`Snapshot`]; the presentation driver decides when
//! to poll and what to print when a snapshot fails.

use std::fmt::Write;

use crate::state::{CpuState, Snapshot};

/// Shown by callers in place of a table when `snapshot()` fails.
pub const UNAVAILABLE_MSG: &str = "CPU states unavailable.";

/// Label for a frequency: `"Deep Sleep"` for the pseudo-state, otherwise
/// the kHz value scaled to MHz.
pub fn freq_label(freq: u32) -> String {
    if freq == crate::state::DEEP_SLEEP_FREQ {
        "Deep Sleep".to_string()
    } else {
        format!("{} MHz", freq / 1000)
    }
}

/// Format a tick count (10 ms units) as `HH:MM:SS`.
pub fn format_ticks(ticks: u64) -> String {
    let seconds = ticks / 100;
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds % 60)
}

/// Signed variant for the total, which can legitimately go negative when
/// a counter underflows its offset.
pub fn format_ticks_signed(ticks: i64) -> String {
    if ticks < 0 {
        format!("-{}", format_ticks(ticks.unsigned_abs()))
    } else {
        format_ticks(ticks as u64)
    }
}

/// One table row: padded frequency label, then duration.
pub fn render_row(state: &CpuState) -> String {
    format!("{:<15}{}", freq_label(state.freq), format_ticks(state.duration))
}

/// Full table: header, one row per state, total summary.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::from("CPU States:\n\n");
    for state in &snapshot.states {
        let _ = writeln!(out, "{}", render_row(state));
    }
    let _ = write!(
        out,
        "\nTotal time: {}\n",
        format_ticks_signed(snapshot.total)
    );
    out
}
