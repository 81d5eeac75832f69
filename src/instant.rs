//! A wall+monotonic instant (component C).
//!
//! Encoded as two fields, `wall: u64` and `ext: i64`, so that the common
//! "now, with a monotonic reading" case stays compact while arbitrary
//! historical or future wall times remain representable. See the module
//! invariants below for the exact bit layout; this is not something a
//! caller should ever need to reach into directly, but it's why `Instant`
//! is `Copy` and cheap.
use crate::calendar::{self, Clock as ClockFields, DateDetail, IsoWeek, Weekday};
use crate::clock::Clock;
use crate::duration::Duration;
use crate::tz::{self, Location};

const NSEC_MASK: u64 = (1 << 30) - 1;
const NSEC_SHIFT: u32 = 30;
const HAS_MONOTONIC: u64 = 1 << 63;

// Derived so that the internal "year 1" lines up with the conventional
// proleptic-Gregorian year 1 (spec §3's three offset constants).
const UNIX_TO_INTERNAL: i64 = (1969 * 365 + 1969 / 4 - 1969 / 100 + 1969 / 400) * 86400;
const INTERNAL_TO_UNIX: i64 = -UNIX_TO_INTERNAL;
const WALL_TO_INTERNAL: i64 = (1884 * 365 + 1884 / 4 - 1884 / 100 + 1884 / 400) * 86400;
const INTERNAL_TO_WALL: i64 = -WALL_TO_INTERNAL;
// (absoluteZeroYear - internalYear) * 365.2425 * secondsPerDay, evaluated
// at arbitrary precision the way Go's constant evaluator does, then
// truncated to an i64.
const ABSOLUTE_TO_INTERNAL: i64 = -9_223_371_966_579_724_800;
const INTERNAL_TO_ABSOLUTE: i64 = -ABSOLUTE_TO_INTERNAL;

/// Earliest wall second (relative to the internal epoch) representable
/// with the monotonic flag set: 1885-01-01.
const MIN_WALL: i64 = WALL_TO_INTERNAL;
/// Latest such second: 1885 + 2^33 - 1 seconds later, i.e. 2157.
const MAX_WALL: i64 = WALL_TO_INTERNAL + ((1i64 << 33) - 1);

fn normalize_nsec(mut sec: i64, mut nsec: i64) -> (i64, i64) {
    if !(0..1_000_000_000).contains(&nsec) {
        let carry = nsec.div_euclid(1_000_000_000);
        sec += carry;
        nsec -= carry * 1_000_000_000;
    }
    (sec, nsec)
}

/// A point in time: a wall-clock reading, optionally paired with a
/// monotonic reading, optionally tied to a [`Location`] for civil-calendar
/// presentation.
///
/// `Instant` is `Copy`; a `Location` is a comparatively heavy immutable
/// value meant to be constructed once and borrowed by many instants (spec
/// §5's "scoped-acquisition pattern") rather than owned by each one.
#[derive(Debug, Clone, Copy)]
pub struct Instant<'loc> {
    wall: u64,
    ext: i64,
    loc: Option<&'loc Location>,
}

impl<'loc> Instant<'loc> {
    /// The zero value: 0001-01-01 00:00:00 UTC, no monotonic reading.
    pub const ZERO: Instant<'static> = Instant {
        wall: 0,
        ext: 0,
        loc: None,
    };

    fn has_monotonic(&self) -> bool {
        self.wall & HAS_MONOTONIC != 0
    }

    /// Seconds since the internal epoch (0001-01-01 00:00:00 UTC).
    fn seconds_internal(&self) -> i64 {
        if self.has_monotonic() {
            WALL_TO_INTERNAL + ((self.wall << 1) >> (NSEC_SHIFT + 1)) as i64
        } else {
            self.ext
        }
    }

    /// Nanosecond-within-second, always in `[0, 1_000_000_000)`.
    pub fn nanosecond(&self) -> u32 {
        (self.wall & NSEC_MASK) as u32
    }

    /// Seconds since the Unix epoch (1970-01-01 00:00:00 UTC).
    pub fn unix_seconds(&self) -> i64 {
        self.seconds_internal() + INTERNAL_TO_UNIX
    }

    /// Build an instant from Unix seconds and nanoseconds, normalizing an
    /// out-of-range `nsec` by carrying into `sec`. Never carries a
    /// monotonic reading.
    pub fn from_unix(sec: i64, nsec: i64, loc: Option<&'loc Location>) -> Self {
        let (sec, nsec) = normalize_nsec(sec, nsec);
        Instant {
            wall: nsec as u64,
            ext: sec + UNIX_TO_INTERNAL,
            loc,
        }
    }

    /// Read the clock capability and build the current instant. Carries a
    /// monotonic reading iff the wall second falls within the
    /// 1885..2157 window the compact representation can encode alongside
    /// it.
    pub fn now(clock: &impl Clock, loc: Option<&'loc Location>) -> Self {
        let (wall_sec, wall_nsec, mono) = clock.now();
        let sec = wall_sec + UNIX_TO_INTERNAL - MIN_WALL;
        if (sec as u64) >> 33 != 0 {
            Instant {
                wall: wall_nsec as u64,
                ext: sec + MIN_WALL,
                loc,
            }
        } else {
            Instant {
                wall: HAS_MONOTONIC | ((sec as u64) << NSEC_SHIFT) | wall_nsec as u64,
                ext: mono as i64,
                loc,
            }
        }
    }

    /// Re-associate this instant with a different (or no) location,
    /// leaving the underlying wall/monotonic reading untouched.
    pub fn with_location<'b>(&self, loc: Option<&'b Location>) -> Instant<'b> {
        Instant {
            wall: self.wall,
            ext: self.ext,
            loc,
        }
    }

    pub fn location(&self) -> Option<&'loc Location> {
        self.loc
    }

    pub fn is_zero(&self) -> bool {
        self.seconds_internal() == 0 && self.nanosecond() == 0
    }

    /// `true` iff `self` is strictly before `other`. Compares monotonic
    /// readings when both instants carry one; otherwise compares wall
    /// time.
    pub fn before(&self, other: &Instant<'_>) -> bool {
        if self.has_monotonic() && other.has_monotonic() {
            self.ext < other.ext
        } else {
            (self.seconds_internal(), self.nanosecond()) < (other.seconds_internal(), other.nanosecond())
        }
    }

    /// `true` iff `self` is strictly after `other`. See [`Instant::before`].
    pub fn after(&self, other: &Instant<'_>) -> bool {
        other.before(self)
    }

    /// `true` iff `self` and `other` denote the same wall time. Always
    /// wall-time semantics, even if both carry a monotonic reading: two
    /// instants synthesized from the same wall clock but with different
    /// monotonic bases should still compare equal.
    pub fn equal(&self, other: &Instant<'_>) -> bool {
        self.seconds_internal() == other.seconds_internal() && self.nanosecond() == other.nanosecond()
    }

    /// Add a duration, preserving the monotonic reading (shifted by the
    /// same delta) as long as the resulting wall second still fits the
    /// compact representation's window; otherwise the result degrades to
    /// wall-only, matching spec §4.C.
    pub fn add(&self, d: Duration) -> Instant<'loc> {
        let mut dsec = d.as_nanos() / 1_000_000_000;
        let mut nsec = self.nanosecond() as i64 + d.as_nanos() % 1_000_000_000;
        if nsec >= 1_000_000_000 {
            dsec += 1;
            nsec -= 1_000_000_000;
        } else if nsec < 0 {
            dsec -= 1;
            nsec += 1_000_000_000;
        }

        let mut wall = (self.wall & !NSEC_MASK) | nsec as u64;
        let mut ext = self.ext;

        if self.has_monotonic() {
            let sec = WALL_TO_INTERNAL + ((wall << 1) >> (NSEC_SHIFT + 1)) as i64;
            let new_sec = sec + dsec;
            if (MIN_WALL..=MAX_WALL).contains(&new_sec) {
                let rel = new_sec - WALL_TO_INTERNAL;
                wall = (wall & NSEC_MASK) | ((rel as u64) << NSEC_SHIFT) | HAS_MONOTONIC;
                let new_ext = ext.wrapping_add(d.as_nanos());
                return Instant {
                    wall,
                    ext: new_ext,
                    loc: self.loc,
                };
            }
            // Degrade to wall-only: rebuild `ext` as internal seconds.
            ext = sec;
            wall &= NSEC_MASK;
        }

        ext = ext.wrapping_add(dsec);
        Instant {
            wall,
            ext,
            loc: self.loc,
        }
    }

    /// Subtract a duration (`add(-d)`).
    pub fn sub_duration(&self, d: Duration) -> Instant<'loc> {
        self.add(-d)
    }

    /// The signed difference `self - other`. Uses the monotonic reading
    /// when both sides carry one; otherwise the wall-time difference.
    pub fn sub(&self, other: &Instant<'_>) -> Duration {
        if self.has_monotonic() && other.has_monotonic() {
            Duration::from_nanos(self.ext.wrapping_sub(other.ext))
        } else {
            let sec_diff = self.seconds_internal().wrapping_sub(other.seconds_internal());
            let nsec_diff = self.nanosecond() as i64 - other.nanosecond() as i64;
            Duration::from_nanos(
                sec_diff
                    .wrapping_mul(1_000_000_000)
                    .wrapping_add(nsec_diff),
            )
        }
    }

    /// The zone in effect for this instant: its abbreviation and offset
    /// east of UTC. A null location means UTC.
    pub fn zone(&self) -> (Box<str>, i32) {
        match self.loc {
            None => ("UTC".into(), 0),
            Some(loc) => {
                let info = tz::lookup(loc, self.unix_seconds());
                (info.name, info.offset_seconds_east_of_utc)
            }
        }
    }

    /// Absolute seconds (spec §3's internal calendar clock) for this
    /// instant's zone-adjusted wall time. Computed in `i128` so the huge
    /// `INTERNAL_TO_ABSOLUTE` offset can't silently wrap an `i64`.
    fn abs(&self) -> u64 {
        let (_, offset) = self.zone();
        let unix = self.unix_seconds() as i128;
        let abs = unix + offset as i128 + UNIX_TO_INTERNAL as i128 + INTERNAL_TO_ABSOLUTE as i128;
        abs as u64
    }

    pub fn date(&self) -> DateDetail {
        calendar::abs_date(self.abs(), true)
    }

    pub fn year(&self) -> i64 {
        self.date().year
    }

    pub fn month(&self) -> u8 {
        self.date().month
    }

    pub fn day(&self) -> u8 {
        self.date().day
    }

    pub fn weekday(&self) -> Weekday {
        calendar::abs_weekday(self.abs())
    }

    /// 0-based day of year, matching [`DateDetail::yday`].
    pub fn year_day(&self) -> u16 {
        self.date().yday
    }

    pub fn clock(&self) -> ClockFields {
        calendar::abs_clock(self.abs())
    }

    pub fn hour(&self) -> u8 {
        self.clock().hour
    }

    pub fn minute(&self) -> u8 {
        self.clock().min
    }

    pub fn second(&self) -> u8 {
        self.clock().sec
    }

    pub fn iso_week(&self) -> IsoWeek {
        calendar::iso_week(self.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn offset_constants_match_expected_values() {
        assert_eq!(UNIX_TO_INTERNAL, 62_135_596_800);
        assert_eq!(WALL_TO_INTERNAL, 59_453_308_800);
    }

    #[test]
    fn round_trip_unix_utc() {
        for sec in [0i64, 1, -1, 1_221_681_866, -1_221_681_866, 253_402_300_799] {
            let inst = Instant::from_unix(sec, 0, None);
            assert_eq!(inst.unix_seconds(), sec);
        }
    }

    #[test]
    fn nanosecond_normalization() {
        let inst = Instant::from_unix(10, 1_500_000_000, None);
        assert_eq!(inst.unix_seconds(), 11);
        assert_eq!(inst.nanosecond(), 500_000_000);

        let inst = Instant::from_unix(10, -500_000_000, None);
        assert_eq!(inst.unix_seconds(), 9);
        assert_eq!(inst.nanosecond(), 500_000_000);
    }

    #[test]
    fn scenario_epoch_utc() {
        let inst = Instant::from_unix(0, 0, None);
        let d = inst.date();
        assert_eq!((d.year, d.month, d.day), (1970, 1, 1));
        assert_eq!(inst.weekday(), Weekday::Thursday);
        let (name, offset) = inst.zone();
        assert_eq!(&*name, "UTC");
        assert_eq!(offset, 0);
    }

    #[test]
    fn scenario_fractional_second() {
        let inst = Instant::from_unix(0, 100_000_000, None);
        assert_eq!(inst.nanosecond(), 100_000_000);
        let d = inst.date();
        assert_eq!((d.year, d.month, d.day), (1970, 1, 1));
    }

    #[test]
    fn monotonic_flag_set_within_window() {
        let clock = FixedClock(1_700_000_000, 123, 99);
        let inst = Instant::now(&clock, None);
        assert!(inst.has_monotonic());
        assert_eq!(inst.unix_seconds(), 1_700_000_000);
        assert_eq!(inst.nanosecond(), 123);
    }

    #[test]
    fn monotonic_flag_clear_outside_window() {
        // Year 3000 or so is outside 1885..2157.
        let clock = FixedClock(32_503_680_000, 0, 42);
        let inst = Instant::now(&clock, None);
        assert!(!inst.has_monotonic());
        assert_eq!(inst.unix_seconds(), 32_503_680_000);
    }

    #[test]
    fn monotonic_comparison_uses_mono_when_both_present() {
        let clock_a = FixedClock(1_700_000_000, 0, 100);
        let clock_b = FixedClock(1_700_000_000, 0, 200);
        let a = Instant::now(&clock_a, None);
        let b = Instant::now(&clock_b, None);
        assert!(a.before(&b));
        assert!(b.after(&a));
        // Equality is wall-time based even though both carry monotonic.
        assert!(a.equal(&b));
    }

    #[test]
    fn add_and_sub_are_inverses_without_monotonic() {
        let a = Instant::from_unix(1_000, 500_000_000, None);
        let d = Duration::from_nanos(2_500_000_000);
        let b = a.add(d);
        assert_eq!(b.unix_seconds(), 1_003);
        assert_eq!(b.sub(&a), d);
    }

    #[test]
    fn add_degrades_monotonic_flag_when_leaving_window() {
        let clock = FixedClock(1_700_000_000, 0, 0);
        let a = Instant::now(&clock, None);
        assert!(a.has_monotonic());
        let huge = Duration::from_nanos(140i64 * 365 * 24 * 3600 * 1_000_000_000);
        let b = a.add(huge);
        assert!(!b.has_monotonic());
    }

    #[test]
    fn zero_value() {
        assert!(Instant::ZERO.is_zero());
        assert_eq!(Instant::ZERO.year(), 1);
    }
}
