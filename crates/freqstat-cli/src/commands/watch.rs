//! `freqstat watch` — poll the monitor on a fixed interval.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use freqstat_core::format;

/// Granularity of the sleep between Ctrl+C checks.
const TICK: Duration = Duration::from_millis(200);

/// Run the watch command.
pub fn run(counter_path: &str, offsets_path: &str, interval_secs: u64) {
    let monitor = super::make_monitor(counter_path, offsets_path);
    let interval = Duration::from_secs(interval_secs);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    println!("Watching {counter_path} every {interval_secs}s (Ctrl+C to stop)");
    println!();

    while running.load(Ordering::SeqCst) {
        // A failed poll is not fatal; the next cycle retries.
        match monitor.snapshot() {
            Ok(snap) => print!("{}", format::render(&snap)),
            Err(e) => {
                log::warn!("snapshot failed: {e}");
                println!("{}", format::UNAVAILABLE_MSG);
            }
        }
        println!();

        let deadline = Instant::now() + interval;
        while running.load(Ordering::SeqCst) && Instant::now() < deadline {
            std::thread::sleep(TICK);
        }
    }
}
