//! Value types for frequency-residency data.

use serde::{Deserialize, Serialize};

/// Frequency sentinel for the synthesized deep-sleep state.
///
/// Deep sleep is not a real cpufreq state; it is derived from clock skew
/// (elapsed time minus awake time) and carries frequency zero so it sorts
/// last when states are ordered by frequency descending.
pub const DEEP_SLEEP_FREQ: u32 = 0;

/// One CPU residency entry: a frequency and the time spent at it.
///
/// `freq` is the kernel-reported frequency in kHz (zero meaning deep
/// sleep); `duration` is in USER_HZ ticks, i.e. 10 ms units. A state is
/// immutable once read: a fresh snapshot fully replaces the previous list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    pub freq: u32,
    pub duration: u64,
}

impl CpuState {
    pub fn new(freq: u32, duration: u64) -> Self {
        Self { freq, duration }
    }

    /// Whether this is the synthesized deep-sleep entry.
    pub fn is_deep_sleep(&self) -> bool {
        self.freq == DEEP_SLEEP_FREQ
    }
}

/// A corrected snapshot: reset-relative states plus the total.
///
/// States are ordered by frequency descending (deep sleep last). `total`
/// is `sum(raw durations) - sum(offsets)`, deliberately not the sum of the
/// per-state clamped durations; when any single counter underflows its
/// offset the two disagree, and the total can go negative. That shortcut
/// is inherited behavior and is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub states: Vec<CpuState>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_sleep_detection() {
        assert!(CpuState::new(DEEP_SLEEP_FREQ, 10).is_deep_sleep());
        assert!(!CpuState::new(1_800_000, 10).is_deep_sleep());
    }
}
