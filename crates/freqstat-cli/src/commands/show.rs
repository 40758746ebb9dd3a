//! `freqstat show` — one corrected residency table.

use freqstat_core::format;

/// Run the show command.
pub fn run(counter_path: &str, offsets_path: &str, json: bool) {
    let monitor = super::make_monitor(counter_path, offsets_path);
    match monitor.snapshot() {
        Ok(snap) if json => match serde_json::to_string_pretty(&snap) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error serializing snapshot: {e}");
                std::process::exit(1);
            }
        },
        Ok(snap) => print!("{}", format::render(&snap)),
        Err(e) => {
            log::error!("snapshot failed: {e}");
            eprintln!("{}", format::UNAVAILABLE_MSG);
            std::process::exit(1);
        }
    }
}
