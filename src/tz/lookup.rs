//! Resolving a UTC instant (or a zone abbreviation) to a zone record
//! (component G).
use crate::tz::zone::{Location, Zone, ZoneTrans, ALPHA, OMEGA};

/// The result of resolving a UTC second to the zone in effect at that
/// moment, plus the half-open `[start, end)` range for which that zone
/// applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    pub name: Box<str>,
    pub offset_seconds_east_of_utc: i32,
    pub is_dst: bool,
    pub start: i64,
    pub end: i64,
}

/// Select the zone used before the first transition (or for all time, if
/// there are no transitions at all). Matches the reference `localtime.c`
/// behavior:
///
/// 1. If zone 0 is never the target of any transition, use zone 0.
/// 2. Else if the first transition points at a DST zone, walk backward
///    from it for the first non-DST zone.
/// 3. Else use the first non-DST zone anywhere in the zone list.
/// 4. Else fall back to zone 0.
pub(crate) fn first_zone_index(zones: &[Zone], transitions: &[ZoneTrans]) -> usize {
    let zone_zero_referenced = transitions.iter().any(|t| t.index == 0);
    if !zone_zero_referenced {
        return 0;
    }

    if let Some(first) = transitions.first() {
        if zones[first.index].is_dst {
            for zi in (0..first.index).rev() {
                if !zones[zi].is_dst {
                    return zi;
                }
            }
        }
    }

    if let Some(zi) = zones.iter().position(|z| !z.is_dst) {
        return zi;
    }

    0
}

fn zone_info(zone: &Zone, start: i64, end: i64) -> ZoneInfo {
    ZoneInfo {
        name: zone.name.clone(),
        offset_seconds_east_of_utc: zone.offset_seconds_east_of_utc,
        is_dst: zone.is_dst,
        start,
        end,
    }
}

/// Binary search `transitions` for the largest index whose `when <= sec`.
/// Returns `None` if every transition is after `sec`.
fn bisect(transitions: &[ZoneTrans], sec: i64) -> Option<usize> {
    if transitions.is_empty() || sec < transitions[0].when {
        return None;
    }
    let (mut lo, mut hi) = (0usize, transitions.len());
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if sec < transitions[mid].when {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Some(lo)
}

/// Resolve the zone in effect at UTC second `sec`.
pub fn lookup(location: &Location, sec: i64) -> ZoneInfo {
    if location.zones.is_empty() {
        return ZoneInfo {
            name: "UTC".into(),
            offset_seconds_east_of_utc: 0,
            is_dst: false,
            start: ALPHA,
            end: OMEGA,
        };
    }

    if let Some(cached) = *location.cache.entry.lock().unwrap() {
        let (start, end, index) = cached;
        if start <= sec && sec < end {
            return zone_info(&location.zones[index], start, end);
        }
    }

    let (zone_index, start, end) = match bisect(&location.transitions, sec) {
        None => {
            let idx = first_zone_index(&location.zones, &location.transitions);
            let end = location
                .transitions
                .first()
                .map(|t| t.when)
                .unwrap_or(OMEGA);
            (idx, ALPHA, end)
        }
        Some(i) => {
            let start = location.transitions[i].when;
            let end = location
                .transitions
                .get(i + 1)
                .map(|t| t.when)
                .unwrap_or(OMEGA);
            (location.transitions[i].index, start, end)
        }
    };

    *location.cache.entry.lock().unwrap() = Some((start, end, zone_index));
    zone_info(&location.zones[zone_index], start, end)
}

/// Find the UTC offset of the zone named `name` that was (or would have
/// been) in effect at UTC second `unix_sec`.
///
/// First pass: prefer a zone that's actually in effect, at the local time
/// implied by its own offset, at `unix_sec`. Second pass: fall back to any
/// zone with a matching abbreviation.
pub fn lookup_name(location: &Location, name: &str, unix_sec: i64) -> Option<i32> {
    for zone in &location.zones {
        if &*zone.name == name {
            let candidate = lookup(location, unix_sec - zone.offset_seconds_east_of_utc as i64);
            if &*candidate.name == name {
                return Some(candidate.offset_seconds_east_of_utc);
            }
        }
    }
    location
        .zones
        .iter()
        .find(|z| &*z.name == name)
        .map(|z| z.offset_seconds_east_of_utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::zone::Zone;

    fn zone(name: &str, offset: i32, dst: bool) -> Zone {
        Zone {
            name: name.into(),
            offset_seconds_east_of_utc: offset,
            is_dst: dst,
        }
    }

    #[test]
    fn no_zones_means_utc() {
        let loc = Location::utc();
        let r = lookup(&loc, 12345);
        assert_eq!(&*r.name, "UTC");
        assert_eq!(r.offset_seconds_east_of_utc, 0);
        assert_eq!((r.start, r.end), (ALPHA, OMEGA));
    }

    #[test]
    fn single_transition_before_and_after() {
        let zones = vec![zone("STD", -28800, false), zone("DST", -25200, true)];
        let transitions = vec![ZoneTrans {
            when: 1000,
            index: 1,
            is_std: true,
            is_utc: true,
        }];
        let loc = Location::new("Test".into(), zones, transitions);

        let before = lookup(&loc, 500);
        assert_eq!(&*before.name, "STD");
        assert_eq!(before.end, 1000);

        let after = lookup(&loc, 1000);
        assert_eq!(&*after.name, "DST");
        assert_eq!(after.start, 1000);
        assert_eq!(after.end, OMEGA);
    }

    #[test]
    fn lookup_monotonicity_across_transitions() {
        let zones = vec![zone("A", 0, false), zone("B", 3600, false), zone("C", 0, false)];
        let transitions = vec![
            ZoneTrans { when: 100, index: 1, is_std: false, is_utc: false },
            ZoneTrans { when: 200, index: 2, is_std: false, is_utc: false },
        ];
        let loc = Location::new("Test".into(), zones, transitions);
        let r1 = lookup(&loc, 150);
        let r2 = lookup(&loc, 199);
        assert_eq!(r1.name, r2.name);
    }

    #[test]
    fn lookup_name_prefers_zone_in_effect() {
        let zones = vec![zone("STD", -28800, false), zone("DST", -25200, true)];
        let transitions = vec![ZoneTrans {
            when: 1_000_000,
            index: 1,
            is_std: true,
            is_utc: true,
        }];
        let loc = Location::new("Test".into(), zones, transitions);
        assert_eq!(lookup_name(&loc, "DST", 2_000_000), Some(-25200));
        assert_eq!(lookup_name(&loc, "STD", 0), Some(-28800));
        assert_eq!(lookup_name(&loc, "NOPE", 0), None);
    }

    #[test]
    fn first_zone_selection_skips_leading_dst() {
        let zones = vec![zone("DST0", 3600, true), zone("STD", 0, false)];
        // zone 0 IS referenced, and it's a DST zone, and there's no earlier
        // non-DST zone to walk back to -> fall through to "first non-DST
        // zone anywhere".
        let transitions = vec![ZoneTrans { when: 500, index: 0, is_std: false, is_utc: false }];
        assert_eq!(first_zone_index(&zones, &transitions), 1);
    }
}
