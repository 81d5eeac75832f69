//! The clock capability: the one external collaborator `Instant::now`
//! depends on (spec §6). Abstracted behind a trait so the crate's own
//! tests can supply a deterministic reading instead of touching the OS.
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of wall-clock and monotonic readings.
///
/// `mono` need only be non-decreasing across calls within a process; its
/// absolute value carries no meaning and is never compared across
/// processes.
pub trait Clock {
    /// Returns `(wall_sec, wall_nsec, mono)`, with `wall_nsec` in
    /// `[0, 1_000_000_000)`.
    fn now(&self) -> (i64, u32, u64);
}

/// The real OS clock: wall time from [`SystemTime`], monotonic from
/// [`std::time::Instant`] relative to process start.
#[derive(Debug, Default)]
pub struct SystemClock {
    start: std::sync::OnceLock<std::time::Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> (i64, u32, u64) {
        let now = SystemTime::now();
        let (wall_sec, wall_nsec) = match now.duration_since(UNIX_EPOCH) {
            Ok(d) => (d.as_secs() as i64, d.subsec_nanos()),
            // Clock set before 1970: mirror the duration arithmetic by hand.
            Err(e) => {
                let d = e.duration();
                let nanos = d.subsec_nanos();
                if nanos == 0 {
                    (-(d.as_secs() as i64), 0)
                } else {
                    (-(d.as_secs() as i64) - 1, 1_000_000_000 - nanos)
                }
            }
        };
        let start = self.start.get_or_init(std::time::Instant::now);
        let mono = start.elapsed().as_nanos() as u64;
        (wall_sec, wall_nsec, mono)
    }
}

#[cfg(test)]
pub(crate) struct FixedClock(pub i64, pub u32, pub u64);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> (i64, u32, u64) {
        (self.0, self.1, self.2)
    }
}
