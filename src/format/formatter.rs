//! Rendering an [`Instant`] against a reference-time layout (component I).
use crate::format::layout::{next_chunk, Chunk, TzNumStyle};
use crate::instant::Instant;
use std::fmt::Write as _;

const MONTH_LONG: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// `ANSIC`: `Mon Jan _2 15:04:05 2006`
pub const ANSIC: &str = "Mon Jan _2 15:04:05 2006";
/// `UnixDate`: `Mon Jan _2 15:04:05 MST 2006`
pub const UNIX_DATE: &str = "Mon Jan _2 15:04:05 MST 2006";
/// `RubyDate`: `Mon Jan 02 15:04:05 -0700 2006`
pub const RUBY_DATE: &str = "Mon Jan 02 15:04:05 -0700 2006";
/// `RFC822`: `02 Jan 06 15:04 MST`
pub const RFC822: &str = "02 Jan 06 15:04 MST";
/// `RFC822Z`: `02 Jan 06 15:04 -0700`
pub const RFC822Z: &str = "02 Jan 06 15:04 -0700";
/// `RFC850`: `Monday, 02-Jan-06 15:04:05 MST`
pub const RFC850: &str = "Monday, 02-Jan-06 15:04:05 MST";
/// `RFC1123`: `Mon, 02 Jan 2006 15:04:05 MST`
pub const RFC1123: &str = "Mon, 02 Jan 2006 15:04:05 MST";
/// `RFC1123Z`: `Mon, 02 Jan 2006 15:04:05 -0700`
pub const RFC1123Z: &str = "Mon, 02 Jan 2006 15:04:05 -0700";
/// `RFC3339`: `2006-01-02T15:04:05Z07:00`
pub const RFC3339: &str = "2006-01-02T15:04:05Z07:00";
/// `RFC3339Nano`: `2006-01-02T15:04:05.999999999Z07:00`
pub const RFC3339_NANO: &str = "2006-01-02T15:04:05.999999999Z07:00";
/// `Kitchen`: `3:04PM`
pub const KITCHEN: &str = "3:04PM";
/// `Stamp`: `Jan _2 15:04:05`
pub const STAMP: &str = "Jan _2 15:04:05";
/// `StampMilli`: `Jan _2 15:04:05.000`
pub const STAMP_MILLI: &str = "Jan _2 15:04:05.000";
/// `StampMicro`: `Jan _2 15:04:05.000000`
pub const STAMP_MICRO: &str = "Jan _2 15:04:05.000000";
/// `StampNano`: `Jan _2 15:04:05.000000000`
pub const STAMP_NANO: &str = "Jan _2 15:04:05.000000000";

fn write_zero_padded(out: &mut String, value: i64, width: usize) {
    let _ = write!(out, "{:0width$}", value, width = width);
}

fn write_space_padded(out: &mut String, value: i64, width: usize) {
    let _ = write!(out, "{:width$}", value, width = width);
}

fn write_offset(out: &mut String, style: TzNumStyle, offset_seconds: i32, iso: bool, zero_is_z: bool) {
    if iso && zero_is_z && offset_seconds == 0 {
        out.push('Z');
        return;
    }
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    let hh = abs / 3600;
    let mm = (abs / 60) % 60;
    let ss = abs % 60;
    out.push(sign);
    match style {
        TzNumStyle::HoursOnly => {
            write_zero_padded(out, hh as i64, 2);
        }
        TzNumStyle::Plain => {
            write_zero_padded(out, hh as i64, 2);
            write_zero_padded(out, mm as i64, 2);
        }
        TzNumStyle::Colon => {
            write_zero_padded(out, hh as i64, 2);
            out.push(':');
            write_zero_padded(out, mm as i64, 2);
        }
        TzNumStyle::PlainSeconds => {
            write_zero_padded(out, hh as i64, 2);
            write_zero_padded(out, mm as i64, 2);
            write_zero_padded(out, ss as i64, 2);
        }
        TzNumStyle::ColonSeconds => {
            write_zero_padded(out, hh as i64, 2);
            out.push(':');
            write_zero_padded(out, mm as i64, 2);
            out.push(':');
            write_zero_padded(out, ss as i64, 2);
        }
    }
}

/// The first `width` digits of `nanosecond`'s 9-digit zero-padded form.
fn frac_digits(nanosecond: u32, width: usize) -> String {
    let scale = 10u32.pow((9 - width) as u32);
    format!("{:0width$}", nanosecond / scale, width = width)
}

/// Render `instant` according to `layout`, in the same sense as Go's
/// reference-time layouts: `layout` is itself a valid rendering of the
/// instant `Mon Jan 2 15:04:05 MST 2006`, and every recognized substring of
/// it is replaced by the corresponding field of `instant`.
pub fn format(instant: &Instant<'_>, layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() + 8);
    let mut rest = layout;
    loop {
        let (prefix, chunk, suffix) = next_chunk(rest);
        out.push_str(prefix);
        let Some(chunk) = chunk else { break };

        match chunk {
            Chunk::LongMonth => out.push_str(MONTH_LONG[(instant.month() - 1) as usize]),
            Chunk::Month => out.push_str(&MONTH_LONG[(instant.month() - 1) as usize][..3]),
            Chunk::NumMonth => {
                let _ = write!(out, "{}", instant.month());
            }
            Chunk::ZeroMonth => write_zero_padded(&mut out, instant.month() as i64, 2),
            Chunk::LongWeekDay => out.push_str(instant.weekday().long_name()),
            Chunk::WeekDay => out.push_str(instant.weekday().short_name()),
            Chunk::Day => {
                let _ = write!(out, "{}", instant.day());
            }
            Chunk::UnderDay => write_space_padded(&mut out, instant.day() as i64, 2),
            Chunk::ZeroDay => write_zero_padded(&mut out, instant.day() as i64, 2),
            Chunk::Hour => write_zero_padded(&mut out, instant.hour() as i64, 2),
            Chunk::Hour12 => {
                let h12 = hour12(instant.hour());
                let _ = write!(out, "{h12}");
            }
            Chunk::ZeroHour12 => write_zero_padded(&mut out, hour12(instant.hour()) as i64, 2),
            Chunk::Minute => {
                let _ = write!(out, "{}", instant.minute());
            }
            Chunk::ZeroMinute => write_zero_padded(&mut out, instant.minute() as i64, 2),
            Chunk::Second => {
                let _ = write!(out, "{}", instant.second());
            }
            Chunk::ZeroSecond => write_zero_padded(&mut out, instant.second() as i64, 2),
            Chunk::LongYear => write_zero_padded(&mut out, instant.year(), 4),
            Chunk::Year => write_zero_padded(&mut out, instant.year().rem_euclid(100), 2),
            Chunk::PM => out.push_str(if instant.hour() >= 12 { "PM" } else { "AM" }),
            Chunk::LowerPM => out.push_str(if instant.hour() >= 12 { "pm" } else { "am" }),
            Chunk::TZ => {
                let (name, offset) = instant.zone();
                if name.is_empty() {
                    write_offset(&mut out, TzNumStyle::Plain, offset, false, false);
                } else {
                    out.push_str(&name);
                }
            }
            Chunk::NumTZ(style) => {
                let (_, offset) = instant.zone();
                write_offset(&mut out, style, offset, false, false);
            }
            Chunk::Iso8601TZ(style) => {
                let (_, offset) = instant.zone();
                write_offset(&mut out, style, offset, true, true);
            }
            Chunk::FracSecond0(width) => {
                out.push('.');
                out.push_str(&frac_digits(instant.nanosecond(), width));
            }
            Chunk::FracSecond9(width) => {
                let digits = frac_digits(instant.nanosecond(), width);
                let trimmed = digits.trim_end_matches('0');
                if !trimmed.is_empty() {
                    out.push('.');
                    out.push_str(trimmed);
                }
            }
        }
        rest = suffix;
    }
    out
}

fn hour12(hour: u8) -> u8 {
    let h = hour % 12;
    if h == 0 {
        12
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::Location;

    // unix(0, 1233810057012345600ns) is a `UnixNano` literal from the
    // reference corpus: 2009-02-04 21:00:57.0123456 in Pacific time.
    fn reference_instant(loc: &Location) -> Instant<'_> {
        Instant::from_unix(1_233_810_057, 12_345_600, Some(loc))
    }

    #[test]
    fn ansic_layout() {
        // This instant's UTC wall time is 2009-02-05 05:00:57 — the
        // Pacific offset (-8h) makes it Feb 4 locally, as in the
        // fixed-offset tests below.
        let loc = Location::utc();
        let inst = reference_instant(&loc);
        assert_eq!(format(&inst, ANSIC), "Thu Feb  5 05:00:57 2009");
    }

    #[test]
    fn rfc3339_nano_trims_trailing_zeros() {
        let loc = Location::utc();
        let inst = reference_instant(&loc);
        assert_eq!(
            format(&inst, RFC3339_NANO),
            "2009-02-05T05:00:57.0123456Z"
        );
    }

    #[test]
    fn stamp_variants_use_fixed_width_without_trimming() {
        let loc = Location::utc();
        let inst = reference_instant(&loc);
        assert_eq!(format(&inst, STAMP), "Feb  5 05:00:57");
        assert_eq!(format(&inst, STAMP_MILLI), "Feb  5 05:00:57.012");
        assert_eq!(format(&inst, STAMP_MICRO), "Feb  5 05:00:57.012345");
        assert_eq!(format(&inst, STAMP_NANO), "Feb  5 05:00:57.012345600");
    }

    #[test]
    fn kitchen_and_pacific_offset() {
        let loc = Location::fixed("PST", -8 * 3600);
        let inst = reference_instant(&loc);
        assert_eq!(format(&inst, KITCHEN), "9:00PM");
        assert_eq!(format(&inst, RFC3339), "2009-02-04T21:00:57-08:00");
    }

    #[test]
    fn rfc822z_numeric_offset() {
        let loc = Location::fixed("PST", -8 * 3600);
        let inst = reference_instant(&loc);
        assert_eq!(format(&inst, RFC822Z), "04 Feb 09 21:00 -0800");
    }

    #[test]
    fn literal_characters_pass_through() {
        let loc = Location::utc();
        let inst = reference_instant(&loc);
        assert_eq!(
            format(&inst, "year=2006, month=01"),
            "year=2009, month=02"
        );
    }
}
