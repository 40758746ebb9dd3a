pub mod reset;
pub mod show;
pub mod watch;

use freqstat_core::StateMonitor;

/// Build a monitor over the given paths and install the persisted
/// baseline. A load failure is reported but not fatal: the monitor keeps
/// running with an empty baseline, and the next successful reset will
/// rewrite the file.
pub fn make_monitor(counter_path: &str, offsets_path: &str) -> StateMonitor {
    let monitor = StateMonitor::with_paths(counter_path, offsets_path);
    if let Err(e) = monitor.load_offsets() {
        eprintln!("Warning: could not load offsets from {offsets_path}: {e}");
    }
    monitor
}
