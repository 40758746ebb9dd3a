//! # freqstat-core
//!
//! CPU frequency-residency monitoring with a reset baseline that the
//! kernel cannot give you.
//!
//! The kernel exposes cumulative per-frequency time-in-state counters
//! that only reset on reboot. This crate makes them reset-relative: a
//! user-initiated reset captures the current counters as an offset
//! baseline, later snapshots subtract it, and the baseline is persisted
//! as JSON so it survives process restarts. A heuristic uptime check
//! invalidates the baseline when the device itself rebooted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use freqstat_core::StateMonitor;
//!
//! let monitor = StateMonitor::new("cpu_state_offsets.json");
//! monitor.load_offsets()?; // install the persisted baseline first
//!
//! let snap = monitor.snapshot()?;
//! println!("{}", freqstat_core::format::render(&snap));
//!
//! monitor.reset()?; // the next snapshot reads near-zero
//! # Ok::<(), freqstat_core::MonitorError>(())
//! ```
//!
//! ## Architecture
//!
//! Reader (parse counters + synthesize deep sleep) → Monitor (subtract
//! offsets, clamp at zero) → corrected snapshot. Reset re-reads the raw
//! counters and writes them wholesale into the offset store, which
//! persists them atomically.
//!
//! Everything is synchronous, blocking, call-and-return; the offset map
//! sits behind one mutex so `snapshot()` and `reset()` cannot interleave
//! over a half-updated baseline.

pub mod clock;
pub mod error;
pub mod format;
pub mod monitor;
pub mod offsets;
pub mod reader;
pub mod state;

pub use clock::{Clock, SystemClock};
pub use error::{MonitorError, Result};
pub use monitor::StateMonitor;
pub use offsets::{GRACE_WINDOW, OffsetStore};
pub use reader::{TIME_IN_STATE_PATH, TimeInStateReader};
pub use state::{CpuState, DEEP_SLEEP_FREQ, Snapshot};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
