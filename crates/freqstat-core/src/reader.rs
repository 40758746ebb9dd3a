//! Time-in-state counter reader.
//!
//! Parses the kernel's cumulative per-frequency residency counters and
//! appends a synthesized deep-sleep state derived from clock skew. Each
//! call re-reads the file from scratch; nothing is cached between reads.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::{MonitorError, Result};
use crate::state::{CpuState, DEEP_SLEEP_FREQ};

/// Aggregate time-in-state counter file for cpu0.
///
/// One line per frequency, `"<freq_khz> <ticks>"`, no header. The kernel
/// only ever increments these counters; they reset on reboot.
pub const TIME_IN_STATE_PATH: &str =
    "/sys/devices/system/cpu/cpu0/cpufreq/stats/time_in_state";

/// Reads raw residency snapshots from the kernel interface file.
pub struct TimeInStateReader {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl TimeInStateReader {
    /// Reader over the default sysfs path with real clocks.
    pub fn new() -> Self {
        Self::with_path(TIME_IN_STATE_PATH)
    }

    /// Reader over a custom counter file with real clocks.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Reader with an injected clock.
    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// Read a full raw snapshot.
    ///
    /// Parses every line, appends the deep-sleep pseudo-state, and sorts
    /// by frequency descending. Any malformed line aborts the whole read;
    /// there are no best-effort partial results.
    pub fn read(&self) -> Result<Vec<CpuState>> {
        let text = fs::read_to_string(&self.path)?;

        let mut states = Vec::new();
        for line in text.lines() {
            states.push(parse_line(line)?);
        }

        // Time asleep is elapsed-since-boot minus awake time, scaled from
        // milliseconds to the kernel's 10 ms ticks.
        let asleep = self.clock.sleep_time();
        states.push(CpuState::new(
            DEEP_SLEEP_FREQ,
            (asleep.as_millis() / 10) as u64,
        ));

        states.sort_unstable_by(|a, b| b.freq.cmp(&a.freq));
        Ok(states)
    }

    /// The counter file this reader is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TimeInStateReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one counter line: first token frequency, second token ticks.
/// Trailing tokens are ignored, matching the kernel format's two columns.
fn parse_line(line: &str) -> Result<CpuState> {
    let mut tokens = line.split_whitespace();
    let (Some(freq), Some(ticks)) = (tokens.next(), tokens.next()) else {
        return Err(MonitorError::parse(line));
    };

    let freq = freq
        .parse::<u32>()
        .map_err(|_| MonitorError::parse(line))?;
    let duration = ticks
        .parse::<u64>()
        .map_err(|_| MonitorError::parse(line))?;

    Ok(CpuState::new(freq, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FakeClock;
    use std::io::Write;
    use std::time::Duration;

    fn reader_for(content: &str, clock: Arc<FakeClock>) -> (tempfile::NamedTempFile, TimeInStateReader) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let reader = TimeInStateReader::with_clock(file.path(), clock);
        (file, reader)
    }

    fn frozen_clock() -> Arc<FakeClock> {
        // 2 s of suspend skew -> 200 ticks of deep sleep.
        Arc::new(FakeClock::new(
            Duration::from_millis(10_000),
            Duration::from_millis(8_000),
        ))
    }

    #[test]
    fn parses_and_sorts_descending() {
        let (_file, reader) =
            reader_for("600000 40\n1800000 1234\n1200000 7\n", frozen_clock());
        let states = reader.read().unwrap();

        assert_eq!(
            states,
            vec![
                CpuState::new(1_800_000, 1234),
                CpuState::new(1_200_000, 7),
                CpuState::new(600_000, 40),
                CpuState::new(0, 200),
            ]
        );
    }

    #[test]
    fn deep_sleep_comes_from_clock_skew() {
        let clock = Arc::new(FakeClock::new(
            Duration::from_millis(60_000),
            Duration::from_millis(45_500),
        ));
        let (_file, reader) = reader_for("1000000 1\n", clock);
        let states = reader.read().unwrap();

        let sleep = states.iter().find(|s| s.is_deep_sleep()).unwrap();
        assert_eq!(sleep.duration, 1450);
    }

    #[test]
    fn malformed_line_aborts_whole_read() {
        let (_file, reader) = reader_for("1800000 1234\nabc 100\n", frozen_clock());
        match reader.read() {
            Err(MonitorError::Parse { line }) => assert_eq!(line, "abc 100"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn short_line_aborts_whole_read() {
        let (_file, reader) = reader_for("1800000\n", frozen_clock());
        assert!(matches!(reader.read(), Err(MonitorError::Parse { .. })));
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let (_file, reader) = reader_for("1800000 1234 extra\n", frozen_clock());
        let states = reader.read().unwrap();
        assert_eq!(states[0], CpuState::new(1_800_000, 1234));
    }

    #[test]
    fn missing_file_is_io_error() {
        let reader =
            TimeInStateReader::with_clock("/nonexistent/time_in_state", frozen_clock());
        assert!(matches!(reader.read(), Err(MonitorError::Io(_))));
    }

    #[test]
    fn empty_file_yields_only_deep_sleep() {
        let (_file, reader) = reader_for("", frozen_clock());
        let states = reader.read().unwrap();
        assert_eq!(states, vec![CpuState::new(0, 200)]);
    }
}
