//! Boot-relative clocks.
//!
//! The monitor needs two views of time since boot: one that keeps counting
//! while the device is suspended (the reboot grace-window check, and the
//! minuend of the deep-sleep calculation) and one that only counts awake
//! time. Both reset to zero on reboot.

use std::time::Duration;

/// Pair of boot-relative, reboot-resetting clocks.
///
/// Injected into the reader and the monitor so tests can freeze time,
/// fabricate suspend skew, or simulate a fresh boot.
pub trait Clock: Send + Sync {
    /// Time since boot including any time spent suspended.
    fn elapsed_since_boot(&self) -> Duration;

    /// Time since boot spent awake.
    fn uptime(&self) -> Duration;

    /// Time the device spent asleep: elapsed minus awake.
    fn sleep_time(&self) -> Duration {
        self.elapsed_since_boot().saturating_sub(self.uptime())
    }
}

/// Real clocks backed by `clock_gettime`.
///
/// On Linux, `CLOCK_BOOTTIME` counts through suspend while
/// `CLOCK_MONOTONIC` does not; their difference is the deep-sleep time.
/// On platforms without `CLOCK_BOOTTIME` both fall back to the monotonic
/// clock and the synthesized deep-sleep duration is zero.
pub struct SystemClock;

#[cfg(any(target_os = "linux", target_os = "android"))]
const BOOT_CLOCK: libc::clockid_t = libc::CLOCK_BOOTTIME;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const BOOT_CLOCK: libc::clockid_t = libc::CLOCK_MONOTONIC;

fn clock_gettime(id: libc::clockid_t) -> Duration {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // clock_gettime only fails for an invalid clock id; both ids used here
    // are compile-time constants known to the target libc.
    let rc = unsafe { libc::clock_gettime(id, &raw mut ts) };
    debug_assert_eq!(rc, 0);
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

impl Clock for SystemClock {
    fn elapsed_since_boot(&self) -> Duration {
        clock_gettime(BOOT_CLOCK)
    }

    fn uptime(&self) -> Duration {
        clock_gettime(libc::CLOCK_MONOTONIC)
    }
}
