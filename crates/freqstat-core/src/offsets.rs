//! Persisted reset baseline.
//!
//! The kernel counters cannot be zeroed from user space, so "reset" means
//! remembering the counter values at reset time and subtracting them later.
//! This module owns that baseline: a frequency -> duration map held in
//! memory and mirrored to a JSON file so it survives process restarts.
//!
//! Reboot handling is a heuristic: if the device booted less than
//! [`GRACE_WINDOW`] ago when the map is loaded, we assume the process
//! start coincides with a boot and the persisted baseline describes
//! counters that no longer exist, so it is wiped. Two failure modes are
//! accepted as a trade-off: a boot-plus-launch slower than the window
//! keeps a stale map, and a mere process restart inside the window wipes a
//! valid one.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{MonitorError, Result};

/// Elapsed-since-boot time below which a load is treated as the first
/// run after boot. Suspend time counts: a device asleep in a pocket for
/// ten minutes is still long past boot.
pub const GRACE_WINDOW: Duration = Duration::from_millis(60_000);

/// Durable frequency -> duration map captured at the last reset.
///
/// Lifecycle: created empty, loaded once at startup, fully overwritten on
/// reset, wiped on reboot detection. There is no error state; a failed
/// load or save leaves the in-memory map unchanged and surfaces the error
/// to the caller.
pub struct OffsetStore {
    path: PathBuf,
    map: BTreeMap<u32, u64>,
}

impl OffsetStore {
    /// Empty store backed by the given file (which need not exist yet).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            map: BTreeMap::new(),
        }
    }

    /// Load the persisted map, applying the reboot heuristic.
    ///
    /// `elapsed_since_boot` is the device's time since boot, suspend
    /// included, at the moment of the call. Under [`GRACE_WINDOW`] the
    /// persisted map is discarded and an empty map is persisted in its
    /// place. A missing file is a normal first run and loads as empty; an
    /// unreadable or corrupt file is an error.
    pub fn load(&mut self, elapsed_since_boot: Duration) -> Result<()> {
        if elapsed_since_boot < GRACE_WINDOW {
            log::info!(
                "{}ms since boot is under the reboot grace window; discarding persisted offsets",
                elapsed_since_boot.as_millis()
            );
            self.map.clear();
            return self.save();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                self.map = serde_json::from_str(&text)?;
                log::debug!("loaded {} offsets from {}", self.map.len(), self.path.display());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.map.clear();
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Serialize the full map and atomically replace the offsets file.
    ///
    /// Writes to a temp file in the target directory and renames it into
    /// place, so a concurrent reader never observes a half-written map.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.map)?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| MonitorError::Io(e.error))?;

        log::debug!("saved {} offsets to {}", self.map.len(), self.path.display());
        Ok(())
    }

    /// Empty the in-memory map. Does not touch the file; the caller
    /// decides when to persist.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Replace the whole map. Does not persist.
    pub fn replace(&mut self, map: BTreeMap<u32, u64>) {
        self.map = map;
    }

    /// Offset for a frequency, zero when absent.
    pub fn get(&self, freq: u32) -> u64 {
        self.map.get(&freq).copied().unwrap_or(0)
    }

    /// Sum of all stored offsets.
    pub fn total(&self) -> u64 {
        self.map.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// The current map, for inspection.
    pub fn map(&self) -> &BTreeMap<u32, u64> {
        &self.map
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
