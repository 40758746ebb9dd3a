//! `freqstat reset` — capture the current counters as the new baseline.

use freqstat_core::format;

/// Run the reset command.
pub fn run(counter_path: &str, offsets_path: &str) {
    let monitor = super::make_monitor(counter_path, offsets_path);
    match monitor.reset() {
        Ok(()) => println!("Baseline captured to {offsets_path}."),
        Err(e) => {
            // A failed save still leaves the reset effective in memory,
            // but this process is about to exit, so durability is the
            // whole point here. Report and fail.
            eprintln!("Error: reset failed: {e}");
            std::process::exit(1);
        }
    }

    match monitor.snapshot() {
        Ok(snap) => print!("{}", format::render(&snap)),
        Err(e) => log::warn!("post-reset snapshot failed: {e}"),
    }
}
