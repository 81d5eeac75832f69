//! Parsing of TZif (zoneinfo) binary files, versions 1-3 (component E).
//!
//! Bit-exact with the format `zic` produces (`tzfile(5)`). Leap-second
//! records are read only to be skipped, and the POSIX TZ trailing string
//! is not used: daylight-rule extrapolation beyond the tabulated
//! transitions is a non-goal here.
use crate::error::Error;
use crate::tz::zone::{Location, Zone, ZoneTrans};

/// A small cursor over a byte slice, in the style of a hand-rolled binary
/// parser: every read either succeeds and advances, or returns `None`
/// without consuming anything.
struct Scan<'a>(&'a [u8]);

impl<'a> Scan<'a> {
    fn new(s: &'a [u8]) -> Self {
        Scan(s)
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.0.len() < n {
            return None;
        }
        let (a, b) = self.0.split_at(n);
        self.0 = b;
        Some(a)
    }

    fn i32be(&mut self) -> Option<i32> {
        self.take(4).map(|b| i32::from_be_bytes(b.try_into().unwrap()))
    }

    fn i64be(&mut self) -> Option<i64> {
        self.take(8).map(|b| i64::from_be_bytes(b.try_into().unwrap()))
    }

    fn u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }
}

#[derive(Debug, Clone, Copy)]
struct Header {
    version: u8,
    isutcnt: i32,
    isstdcnt: i32,
    leapcnt: i32,
    timecnt: i32,
    typecnt: i32,
    charcnt: i32,
}

const BAD: &str = "truncated or inconsistent data";

fn parse_header(s: &mut Scan) -> Result<Header, Error> {
    let magic = s.take(4).ok_or(short("header"))?;
    if magic != b"TZif" {
        return Err(malformed("bad magic bytes"));
    }
    let version = match s.u8().ok_or(short("version"))? {
        0 => 0,
        b'2' => 2,
        b'3' => 3,
        _ => return Err(malformed("unsupported version byte")),
    };
    s.take(15).ok_or(short("reserved bytes"))?; // reserved
    let mut ints = [0i32; 6];
    for slot in &mut ints {
        *slot = s.i32be().ok_or(short("header counts"))?;
    }
    Ok(Header {
        version,
        isutcnt: ints[0],
        isstdcnt: ints[1],
        leapcnt: ints[2],
        timecnt: ints[3],
        typecnt: ints[4],
        charcnt: ints[5],
    })
}

fn malformed(reason: &'static str) -> Error {
    Error::MalformedZoneFile { reason }
}

fn short(_where: &'static str) -> Error {
    Error::MalformedZoneFile { reason: BAD }
}

struct RawBody {
    transition_times: Vec<i64>,
    transition_indices: Vec<u8>,
    gmtoff: Vec<i32>,
    isdst: Vec<bool>,
    abbr_index: Vec<u8>,
    chars: Vec<u8>,
    isstd: Vec<bool>,
    isutc: Vec<bool>,
}

fn parse_body(header: Header, s: &mut Scan, wide_times: bool) -> Result<RawBody, Error> {
    let timecnt = header.timecnt as usize;
    let typecnt = header.typecnt as usize;
    let charcnt = header.charcnt as usize;

    let mut transition_times = Vec::with_capacity(timecnt);
    if wide_times {
        for _ in 0..timecnt {
            transition_times.push(s.i64be().ok_or(short("transition times"))?);
        }
    } else {
        for _ in 0..timecnt {
            transition_times.push(s.i32be().ok_or(short("transition times"))? as i64);
        }
    }

    let mut transition_indices = Vec::with_capacity(timecnt);
    for _ in 0..timecnt {
        transition_indices.push(s.u8().ok_or(short("transition indices"))?);
    }
    for &idx in &transition_indices {
        if idx as usize >= typecnt {
            return Err(malformed("transition index out of range"));
        }
    }

    let mut gmtoff = Vec::with_capacity(typecnt);
    let mut isdst = Vec::with_capacity(typecnt);
    let mut abbr_index = Vec::with_capacity(typecnt);
    for _ in 0..typecnt {
        gmtoff.push(s.i32be().ok_or(short("ttinfo gmtoff"))?);
        isdst.push(s.u8().ok_or(short("ttinfo isdst"))? != 0);
        abbr_index.push(s.u8().ok_or(short("ttinfo abbrind"))?);
    }

    let chars = s.take(charcnt).ok_or(short("abbreviation chars"))?.to_vec();
    for &idx in &abbr_index {
        if idx as usize >= chars.len() {
            return Err(malformed("abbreviation index out of range"));
        }
    }

    // Leap-second records: skipped entirely (non-goal).
    let leap_width = if wide_times { 12 } else { 8 };
    s.take(header.leapcnt as usize * leap_width)
        .ok_or(short("leap second records"))?;

    let isstd_raw = s.take(header.isstdcnt as usize).ok_or(short("isstd flags"))?;
    let isutc_raw = s.take(header.isutcnt as usize).ok_or(short("isutc flags"))?;

    // Per tzfile(5): if the count doesn't match typecnt, every flag in
    // that array is treated as false (i.e. local/wall time).
    let isstd = if header.isstdcnt as usize == typecnt {
        isstd_raw.iter().map(|&b| b != 0).collect()
    } else {
        vec![false; typecnt]
    };
    let isutc = if header.isutcnt as usize == typecnt {
        isutc_raw.iter().map(|&b| b != 0).collect()
    } else {
        vec![false; typecnt]
    };

    Ok(RawBody {
        transition_times,
        transition_indices,
        gmtoff,
        isdst,
        abbr_index,
        chars,
        isstd,
        isutc,
    })
}

fn abbrev_at(chars: &[u8], index: u8) -> Box<str> {
    let start = index as usize;
    let end = chars[start..]
        .iter()
        .position(|&b| b == 0)
        .map(|n| start + n)
        .unwrap_or(chars.len());
    String::from_utf8_lossy(&chars[start..end]).into_owned().into_boxed_str()
}

/// Parse a complete TZif buffer into a [`Location`] named `key`.
///
/// `key` is not parsed from the file (tzfiles carry no self-identifying
/// name) — it is the caller's IANA identifier, attached so the resulting
/// `Location` can be displayed meaningfully.
pub fn parse(data: &[u8], key: &str) -> Result<Location, Error> {
    let mut s = Scan::new(data);
    let header = parse_header(&mut s)?;

    let (header, body) = if header.version >= 2 {
        // Skip the entire version-1 block: it duplicates what follows with
        // 32-bit transition times, and we only want the wide one.
        let v1_body_len = header.timecnt as usize * 4
            + header.timecnt as usize
            + header.typecnt as usize * 6
            + header.charcnt as usize
            + header.leapcnt as usize * 8
            + header.isstdcnt as usize
            + header.isutcnt as usize;
        s.take(v1_body_len).ok_or(short("v1 block"))?;
        let header2 = parse_header(&mut s)?;
        let body = parse_body(header2, &mut s, true)?;
        (header2, body)
    } else {
        let body = parse_body(header, &mut s, false)?;
        (header, body)
    };
    // The POSIX TZ trailing string (if any) is intentionally left unread:
    // we don't extrapolate rules past the tabulated transitions.
    let _ = header;

    if body.gmtoff.is_empty() {
        return Err(malformed("zero zone types"));
    }

    let zones: Vec<Zone> = (0..body.gmtoff.len())
        .map(|i| Zone {
            name: abbrev_at(&body.chars, body.abbr_index[i]),
            offset_seconds_east_of_utc: body.gmtoff[i],
            is_dst: body.isdst[i],
        })
        .collect();

    let mut transitions: Vec<ZoneTrans> = body
        .transition_times
        .iter()
        .zip(body.transition_indices.iter())
        .map(|(&when, &idx)| ZoneTrans {
            when,
            index: idx as usize,
            is_std: body.isstd[idx as usize],
            is_utc: body.isutc[idx as usize],
        })
        .collect();
    transitions.sort_by_key(|t| t.when);

    if transitions.is_empty() {
        transitions.push(ZoneTrans {
            when: crate::tz::zone::ALPHA,
            index: super::lookup::first_zone_index(&zones, &transitions),
            is_std: false,
            is_utc: false,
        });
    }

    Ok(Location::new(key.to_string(), zones, transitions))
}
