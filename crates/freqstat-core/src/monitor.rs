//! State monitor: corrected residency snapshots and the reset operation.
//!
//! Composes the counter reader with the offset store. All access to the
//! offset map goes through one mutex, so a `snapshot()` can never observe
//! a half-applied `reset()` even though the expected caller is a single
//! polling loop.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::offsets::OffsetStore;
use crate::reader::{TIME_IN_STATE_PATH, TimeInStateReader};
use crate::state::{CpuState, Snapshot};

/// Frequency-residency monitor with a persisted reset baseline.
///
/// Call [`load_offsets`](Self::load_offsets) once before the first
/// [`snapshot`](Self::snapshot); the load is deliberately explicit, not
/// lazy, so startup ordering mistakes show up as uncorrected totals in
/// review rather than as hidden I/O on the first poll.
pub struct StateMonitor {
    reader: TimeInStateReader,
    offsets: Mutex<OffsetStore>,
    clock: Arc<dyn Clock>,
}

impl StateMonitor {
    /// Monitor over the default sysfs counter path and the given offsets
    /// file, with real clocks.
    pub fn new(offsets_path: impl Into<std::path::PathBuf>) -> Self {
        Self::with_paths(TIME_IN_STATE_PATH, offsets_path)
    }

    /// Monitor with custom counter and offsets paths, with real clocks.
    pub fn with_paths(
        counter_path: impl Into<std::path::PathBuf>,
        offsets_path: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self::with_clock(counter_path, offsets_path, Arc::new(SystemClock))
    }

    /// Monitor with an injected clock, shared by the reader (deep-sleep
    /// synthesis) and the reboot grace-window check.
    pub fn with_clock(
        counter_path: impl Into<std::path::PathBuf>,
        offsets_path: impl Into<std::path::PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reader: TimeInStateReader::with_clock(counter_path, clock.clone()),
            offsets: Mutex::new(OffsetStore::new(offsets_path)),
            clock,
        }
    }

    /// Install the persisted baseline. Must run before the first
    /// `snapshot()`; applies the reboot heuristic (see [`crate::offsets`]).
    ///
    /// The heuristic is keyed on elapsed-since-boot time (suspend
    /// included), not awake time: a device that spent most of its time
    /// since boot suspended is still long past boot.
    pub fn load_offsets(&self) -> Result<()> {
        let elapsed = self.clock.elapsed_since_boot();
        self.offsets.lock().unwrap().load(elapsed)
    }

    /// Read a fresh raw snapshot and correct it against the baseline.
    ///
    /// Per frequency: `corrected = max(raw - offset, 0)`, offset zero when
    /// the frequency has no baseline entry. An offset exceeding its raw
    /// counter means the kernel reset underneath us without tripping the
    /// uptime heuristic; that frequency alone is clamped and logged, the
    /// rest of the map is left alone.
    ///
    /// The total is `sum(raw) - sum(offsets)` rather than the sum of the
    /// clamped values, so it can go negative when a counter underflows.
    /// Inherited shortcut, kept deliberately.
    ///
    /// A failed read leaves the offset map untouched.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let raw = self.reader.read()?;
        let offsets = self.offsets.lock().unwrap();

        let mut states = Vec::with_capacity(raw.len());
        let mut raw_total: u64 = 0;
        for state in &raw {
            raw_total += state.duration;
            let offset = offsets.get(state.freq);
            if offset > state.duration {
                log::warn!(
                    "offset for freq {} exceeds raw counter ({} > {}); clamping to 0",
                    state.freq,
                    offset,
                    state.duration
                );
            }
            states.push(CpuState::new(
                state.freq,
                state.duration.saturating_sub(offset),
            ));
        }

        // Sums past i64::MAX are unreachable with real kernel ticks, but
        // saturate rather than wrap if a hand-edited offsets file gets us
        // there.
        let total = i64::try_from(raw_total).unwrap_or(i64::MAX)
            - i64::try_from(offsets.total()).unwrap_or(i64::MAX);
        Ok(Snapshot { states, total })
    }

    /// Capture the current raw counters as the new baseline and persist it.
    ///
    /// The in-memory map is overwritten before the save, and a save
    /// failure does not roll it back: the reset stays visually effective
    /// for this process lifetime even when it could not be made durable.
    /// The error is still returned so the caller can tell the user.
    pub fn reset(&self) -> Result<()> {
        let raw = self.reader.read()?;
        let mut offsets = self.offsets.lock().unwrap();
        offsets.replace(raw.iter().map(|s| (s.freq, s.duration)).collect());
        offsets.save()
    }

    /// Copy of the current baseline, for inspection.
    pub fn offsets(&self) -> BTreeMap<u32, u64> {
        self.offsets.lock().unwrap().map().clone()
    }

    /// Where the baseline is persisted.
    pub fn offsets_path(&self) -> std::path::PathBuf {
        self.offsets.lock().unwrap().path().to_path_buf()
    }

    /// The counter file being monitored.
    pub fn counter_path(&self) -> &Path {
        // Reader path is fixed at construction.
        self.reader.path()
    }
}
