//! Splitting a layout string into literal runs and recognized chunks
//! (component H).
//!
//! Every layout is written against the reference instant
//! `Mon Jan 2 15:04:05 MST 2006` (Unix second 1136239445, zone `MST`,
//! offset `-7h`). A chunk is any substring that would render a piece of
//! that specific instant; everything else passes through unchanged.

/// Numeric-offset rendering variants, shared between the always-numeric
/// (`-0700`) and ISO-8601 (`Z0700`) families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TzNumStyle {
    /// `-07`
    HoursOnly,
    /// `-0700`
    Plain,
    /// `-07:00`
    Colon,
    /// `-070000`
    PlainSeconds,
    /// `-07:00:00`
    ColonSeconds,
}

/// A recognized layout token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    LongMonth,
    Month,
    NumMonth,
    ZeroMonth,
    LongWeekDay,
    WeekDay,
    Day,
    UnderDay,
    ZeroDay,
    Hour,
    Hour12,
    ZeroHour12,
    Minute,
    ZeroMinute,
    Second,
    ZeroSecond,
    LongYear,
    Year,
    PM,
    LowerPM,
    TZ,
    /// Always-numeric offset, e.g. `-0700`.
    NumTZ(TzNumStyle),
    /// `Z`-when-zero offset, e.g. `Z0700`.
    Iso8601TZ(TzNumStyle),
    /// `.000`-style fraction: fixed width, trailing zeros kept.
    FracSecond0(usize),
    /// `.999`-style fraction: fixed width, trailing zeros (and an
    /// all-zero fraction's decimal point) trimmed.
    FracSecond9(usize),
}

fn not_followed_by_lowercase(s: &[u8], at: usize) -> bool {
    !matches!(s.get(at), Some(b) if b.is_ascii_lowercase())
}

fn match_tz_numeric(s: &[u8], marker: u8) -> Option<(TzNumStyle, usize)> {
    debug_assert_eq!(s[0], marker);
    let rest = &s[1..];
    // Longest literal match wins; order matters.
    if rest.starts_with(b"07:00:00") {
        Some((TzNumStyle::ColonSeconds, 9))
    } else if rest.starts_with(b"070000") {
        Some((TzNumStyle::PlainSeconds, 7))
    } else if rest.starts_with(b"07:00") {
        Some((TzNumStyle::Colon, 6))
    } else if rest.starts_with(b"0700") {
        Some((TzNumStyle::Plain, 5))
    } else if rest.starts_with(b"07") {
        Some((TzNumStyle::HoursOnly, 3))
    } else {
        None
    }
}

fn match_fraction(s: &[u8]) -> Option<(Chunk, usize)> {
    debug_assert_eq!(s[0], b'.');
    let digit = *s.get(1)?;
    if digit != b'0' && digit != b'9' {
        return None;
    }
    let run = s[1..].iter().take_while(|&&b| b == digit).count();
    if run == 0 {
        return None;
    }
    // A fraction chunk must not be followed by another digit (".911" is not
    // ".9" + literal "11"); fall through to other tokens in that case.
    if s.get(1 + run).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let chunk = if digit == b'0' {
        Chunk::FracSecond0(run)
    } else {
        Chunk::FracSecond9(run)
    };
    Some((chunk, 1 + run))
}

/// Try to match a chunk starting exactly at `s[0]`. Returns the chunk and
/// how many bytes it consumed, or `None` if `s` doesn't start with a
/// recognized token.
fn match_at(s: &[u8]) -> Option<(Chunk, usize)> {
    match *s.first()? {
        b'J' => {
            if s.starts_with(b"January") {
                Some((Chunk::LongMonth, 7))
            } else if s.starts_with(b"Jan") && not_followed_by_lowercase(s, 3) {
                Some((Chunk::Month, 3))
            } else {
                None
            }
        }
        b'M' => {
            if s.starts_with(b"Monday") {
                Some((Chunk::LongWeekDay, 6))
            } else if s.starts_with(b"Mon") && not_followed_by_lowercase(s, 3) {
                Some((Chunk::WeekDay, 3))
            } else if s.starts_with(b"MST") {
                Some((Chunk::TZ, 3))
            } else {
                None
            }
        }
        b'0' => {
            if s.starts_with(b"01") {
                Some((Chunk::ZeroMonth, 2))
            } else if s.starts_with(b"02") {
                Some((Chunk::ZeroDay, 2))
            } else if s.starts_with(b"03") {
                Some((Chunk::ZeroHour12, 2))
            } else if s.starts_with(b"04") {
                Some((Chunk::ZeroMinute, 2))
            } else if s.starts_with(b"05") {
                Some((Chunk::ZeroSecond, 2))
            } else if s.starts_with(b"06") {
                Some((Chunk::Year, 2))
            } else {
                None
            }
        }
        b'1' => {
            if s.starts_with(b"15") {
                Some((Chunk::Hour, 2))
            } else {
                Some((Chunk::NumMonth, 1))
            }
        }
        b'2' => {
            if s.starts_with(b"2006") {
                Some((Chunk::LongYear, 4))
            } else {
                Some((Chunk::Day, 1))
            }
        }
        b'_' => {
            if s.starts_with(b"_2") {
                Some((Chunk::UnderDay, 2))
            } else {
                None
            }
        }
        b'3' => Some((Chunk::Hour12, 1)),
        b'4' => Some((Chunk::Minute, 1)),
        b'5' => Some((Chunk::Second, 1)),
        b'P' => s.starts_with(b"PM").then_some((Chunk::PM, 2)),
        b'p' => s.starts_with(b"pm").then_some((Chunk::LowerPM, 2)),
        b'-' => match_tz_numeric(s, b'-').map(|(style, n)| (Chunk::NumTZ(style), n)),
        b'Z' => match_tz_numeric(s, b'Z').map(|(style, n)| (Chunk::Iso8601TZ(style), n)),
        b'.' => match_fraction(s),
        _ => None,
    }
}

/// Scan `layout` for the next recognized chunk.
///
/// Returns `(prefix, chunk, suffix)`: `prefix` is literal text to pass
/// through unchanged, `chunk` is `None` if no token was found anywhere in
/// the remainder (in which case `suffix` is empty and `prefix` is the
/// whole remaining layout), and `suffix` is everything after the chunk.
pub fn next_chunk(layout: &str) -> (&str, Option<Chunk>, &str) {
    let bytes = layout.as_bytes();
    for i in 0..bytes.len() {
        if let Some((chunk, len)) = match_at(&bytes[i..]) {
            return (&layout[..i], Some(chunk), &layout[i + len..]);
        }
    }
    (layout, None, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_literal_has_no_chunk() {
        let (prefix, chunk, suffix) = next_chunk("hello world");
        assert_eq!(prefix, "hello world");
        assert!(chunk.is_none());
        assert_eq!(suffix, "");
    }

    #[test]
    fn long_year_before_day() {
        let (prefix, chunk, suffix) = next_chunk("2006-01-02");
        assert_eq!(prefix, "");
        assert_eq!(chunk, Some(Chunk::LongYear));
        assert_eq!(suffix, "-01-02");
    }

    #[test]
    fn january_is_not_mistaken_for_jan_plus_uary() {
        let (prefix, chunk, suffix) = next_chunk("Hi Janet, the Month is January");
        assert_eq!(prefix, "Hi Janet, the Month is ");
        assert_eq!(chunk, Some(Chunk::LongMonth));
        assert_eq!(suffix, "");
    }

    #[test]
    fn jan_is_recognized_when_not_followed_by_lowercase() {
        let (prefix, chunk, suffix) = next_chunk("Jan 2");
        assert_eq!(prefix, "");
        assert_eq!(chunk, Some(Chunk::Month));
        assert_eq!(suffix, " 2");
    }

    #[test]
    fn fractional_seconds_with_trimming_variant() {
        let (_, chunk, suffix) = next_chunk(".999999999Z07:00");
        assert_eq!(chunk, Some(Chunk::FracSecond9(9)));
        assert_eq!(suffix, "Z07:00");
    }

    #[test]
    fn numeric_offset_variants_longest_match_first() {
        assert_eq!(
            next_chunk("-07:00:00").1,
            Some(Chunk::NumTZ(TzNumStyle::ColonSeconds))
        );
        assert_eq!(
            next_chunk("-0700").1,
            Some(Chunk::NumTZ(TzNumStyle::Plain))
        );
        assert_eq!(
            next_chunk("-07").1,
            Some(Chunk::NumTZ(TzNumStyle::HoursOnly))
        );
    }

    #[test]
    fn fraction_followed_by_another_digit_is_not_a_fraction_chunk() {
        // ".911" must not tokenize as FracSecond9(1) + literal "11"; the
        // trailing digit disqualifies the whole run as a fraction chunk.
        let (prefix, chunk, suffix) = next_chunk(".911");
        assert_eq!(prefix, "");
        assert!(chunk.is_none());
        assert_eq!(suffix, "");
        // The dot is still ordinary literal text ahead of a following token.
        let (prefix, chunk, suffix) = next_chunk(".911Monday");
        assert_eq!(prefix, ".911");
        assert_eq!(chunk, Some(Chunk::WeekDay));
        assert_eq!(suffix, "");
    }
}
