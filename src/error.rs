//! Error taxonomy for zone loading and lookup.
//!
//! Instant construction, calendar math, duration arithmetic, and formatting
//! are all total: they never fail. The only fallible operations in this
//! crate are loading a [`crate::tz::Location`] from tzdata and looking up a
//! zone abbreviation by name.
use std::path::PathBuf;

/// Errors produced while loading or querying time zone data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tzfile binary data failed a structural check: bad magic, bad
    /// version byte, an out-of-range index, or a truncated section.
    #[error("malformed zone file: {reason}")]
    MalformedZoneFile { reason: &'static str },

    /// No search path yielded a file for the requested zone name.
    #[error("zone file not found: {name}")]
    ZoneFileNotFound { name: String },

    /// `lookup_name` found no zone whose abbreviation matches.
    #[error("no zone named {name:?} in this location")]
    ZoneNotFound { name: String },

    /// A candidate zoneinfo path exceeded the 10 MiB read cap.
    #[error("zone file too large: {path}")]
    ZoneFileTooLarge { path: PathBuf },

    /// Underlying I/O failure while reading a zoneinfo file.
    #[error("I/O error reading zone data: {0}")]
    Io(#[from] std::io::Error),

    /// Reserved: parsing a layout back into an instant is a non-goal of
    /// this crate. No code path constructs this variant today, but it is
    /// kept in the enum so callers can match exhaustively once parsing
    /// lands.
    #[error("layout cannot be parsed back into an instant")]
    BadLayoutForParse,
}

/// Convenience alias for fallible zone operations.
pub type Result<T> = std::result::Result<T, Error>;
