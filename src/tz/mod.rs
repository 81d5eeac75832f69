//! Timezones and time zone information files (TZif).
pub mod lookup;
pub mod source;
pub mod tzif;
pub mod zone;

pub use lookup::{lookup, lookup_name, ZoneInfo};
pub use source::{default_location, load, FsZoneSource, ZoneSource, DEFAULT_SEARCH_PATHS};
pub use zone::{Location, Zone, ZoneTrans};
