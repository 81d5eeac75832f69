//! Instants, calendars, and IANA time zones.
//!
//! This crate models time the way a small, careful standard library would:
//! a dual wall-clock/monotonic [`Instant`], pure proleptic-Gregorian
//! calendar arithmetic in [`calendar`], an IANA tzfile (`TZif`) loader and
//! zone-lookup engine in [`tz`], a [`Duration`] with human-readable
//! rendering, and a reference-time [`format`] layer modeled on a layout
//! string rather than `strftime` verbs.
//!
//! Everything except zone loading and zone-name lookup is infallible:
//! calendar math, duration arithmetic, and formatting never fail, they can
//! only be asked to do something nonsensical and do it consistently (see
//! each module's edge-case notes). Loading a [`tz::Location`] from disk is
//! the one place this crate touches the filesystem or the environment, and
//! it goes through the [`clock::Clock`] / [`tz::ZoneSource`] capability
//! traits so it can be exercised without either in tests.
pub mod calendar;
pub mod clock;
pub mod duration;
pub mod error;
pub mod format;
pub mod instant;
pub mod tz;

pub use calendar::{DateDetail, IsoWeek, Weekday};
pub use clock::{Clock, SystemClock};
pub use duration::Duration;
pub use error::{Error, Result};
pub use instant::Instant;
pub use tz::{default_location, load, Location, ZoneSource};
