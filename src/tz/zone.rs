//! In-memory representation of a zone set and its transitions (component D).
use std::sync::Mutex;

/// Absolute bounds used when a lookup result's range has no finite edge on
/// one side: the earliest and latest representable instant.
pub(crate) const ALPHA: i64 = i64::MIN;
pub(crate) const OMEGA: i64 = i64::MAX;

/// A single named UTC offset, e.g. "CET" at +3600 or "PDT" at -25200.
///
/// `name` is the abbreviation used in formatted output (`%Z`-style), not
/// the IANA identifier — that identifier lives on the owning [`Location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub name: Box<str>,
    pub offset_seconds_east_of_utc: i32,
    pub is_dst: bool,
}

/// A single transition point: from `when` (a Unix second) onward, the zone
/// in effect is `zones[index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneTrans {
    pub when: i64,
    pub index: usize,
    /// Whether the source file expressed `when` in standard (vs. daylight)
    /// time. Recorded for round-tripping only; lookup never consults it.
    pub is_std: bool,
    /// Whether the source file expressed `when` in UTC (vs. local) time.
    /// Recorded for round-tripping only; lookup never consults it.
    pub is_utc: bool,
}

/// A single-entry memo of the last zone lookup, guarded for concurrent
/// reads. Purely an optimization: dropping or staling this cache never
/// changes the result of a lookup, only its cost.
#[derive(Debug, Default)]
pub(crate) struct LookupCache {
    pub(crate) entry: Mutex<Option<(i64, i64, usize)>>,
}

/// A named set of zones and the transitions between them — what the IANA
/// database calls a time zone (e.g. "America/Los_Angeles").
///
/// Immutable after construction except for the internal lookup cache,
/// which is safe to mutate from multiple threads concurrently (it only
/// ever gets faster or slower to read, never wrong).
#[derive(Debug)]
pub struct Location {
    pub name: String,
    pub(crate) zones: Vec<Zone>,
    pub(crate) transitions: Vec<ZoneTrans>,
    pub(crate) cache: LookupCache,
}

impl Location {
    pub(crate) fn new(name: String, zones: Vec<Zone>, transitions: Vec<ZoneTrans>) -> Self {
        debug_assert!(transitions.windows(2).all(|w| w[0].when < w[1].when));
        debug_assert!(transitions.iter().all(|t| t.index < zones.len()));
        Location {
            name,
            zones,
            transitions,
            cache: LookupCache::default(),
        }
    }

    /// The fixed UTC location: no zones, no transitions. `lookup` special-
    /// cases an empty zone list to mean "UTC, offset 0, for all time" per
    /// spec §4.G, so this is deliberately the minimal possible `Location`.
    pub fn utc() -> Self {
        Location::new("UTC".to_string(), Vec::new(), Vec::new())
    }

    /// A fixed-offset location with a single zone and no transitions —
    /// useful for tests and for representing a numeric-only offset that
    /// has no IANA identifier.
    pub fn fixed(name: &str, offset_seconds_east_of_utc: i32) -> Self {
        Location::new(
            name.to_string(),
            vec![Zone {
                name: name.into(),
                offset_seconds_east_of_utc,
                is_dst: false,
            }],
            Vec::new(),
        )
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn transitions(&self) -> &[ZoneTrans] {
        &self.transitions
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.zones == other.zones && self.transitions == other.transitions
    }
}
