//! Locating and loading tzdata from disk or environment (component F).
use crate::error::Error;
use crate::tz::tzif;
use crate::tz::zone::Location;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Refuse to read a candidate zoneinfo file larger than this. Real tzfiles
/// top out at a few KiB; this is a sanity backstop against being pointed at
/// an arbitrary huge file.
pub const MAX_ZONE_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// The "read a file" half of the zone source capability from spec §6.
/// Abstracted so tests can simulate a filesystem without touching one.
pub trait ZoneSource {
    /// Read the full contents of `path`, or `None` if it doesn't exist.
    /// Any other I/O failure is an `Err`.
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, Error>;
}

/// The default search paths, tried in order until one yields the file.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/zoneinfo/",
    "/usr/share/lib/zoneinfo/",
    "/usr/lib/locale/TZ/",
];

/// A [`ZoneSource`] backed by `std::fs`, enforcing the 10 MiB cap.
#[derive(Debug, Default, Clone)]
pub struct FsZoneSource;

impl ZoneSource for FsZoneSource {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, Error> {
        let meta = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };
        if !meta.is_file() {
            return Ok(None);
        }
        if meta.len() > MAX_ZONE_FILE_BYTES {
            warn!("refusing to read {}: exceeds 10 MiB cap", path.display());
            return Err(Error::ZoneFileTooLarge {
                path: path.to_path_buf(),
            });
        }
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Load the zone named `key` by trying each of `search_paths` in order.
pub fn load(source: &impl ZoneSource, search_paths: &[PathBuf], key: &str) -> Result<Location, Error> {
    for base in search_paths {
        let candidate = base.join(key);
        match source.read(&candidate) {
            Ok(Some(bytes)) => {
                let loc = tzif::parse(&bytes, key)?;
                info!("loaded zone {key} from {}", candidate.display());
                return Ok(loc);
            }
            Ok(None) => {
                debug!("zone {key} not found at {}", candidate.display());
            }
            Err(e) => return Err(e),
        }
    }
    Err(Error::ZoneFileNotFound {
        name: key.to_string(),
    })
}

/// Resolve the *default* zone per spec §4.F / §6:
///
/// - a non-empty, non-`"UTC"` `env_tz` is tried against the search path;
///   any failure falls back to UTC.
/// - an unset/empty `env_tz` tries `localtime` under `etc_dir`, renaming
///   the result to `"local"` on success.
/// - otherwise, UTC.
pub fn default_location(
    source: &impl ZoneSource,
    search_paths: &[PathBuf],
    etc_dir: &Path,
    env_tz: Option<&str>,
) -> Location {
    match env_tz {
        Some(name) if !name.is_empty() && name != "UTC" => {
            match load(source, search_paths, name) {
                Ok(loc) => loc,
                Err(e) => {
                    debug!("falling back to UTC: failed to load TZ={name:?}: {e}");
                    Location::utc()
                }
            }
        }
        Some(_) => Location::utc(), // explicitly empty or "UTC"
        None => {
            let path = etc_dir.join("localtime");
            match source.read(&path) {
                Ok(Some(bytes)) => match tzif::parse(&bytes, "localtime") {
                    Ok(mut loc) => {
                        loc.name = "local".to_string();
                        loc
                    }
                    Err(_) => Location::utc(),
                },
                _ => Location::utc(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FakeSource {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl ZoneSource for FakeSource {
        fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, Error> {
            Ok(self.files.borrow().get(path).cloned())
        }
    }

    fn minimal_tzif(name: &str, offset: i32) -> Vec<u8> {
        // Reuse the tzif test builder's shape inline, since it's private
        // to that module: a fixed-offset, transition-free zone.
        let mut buf = Vec::new();
        buf.extend_from_slice(b"TZif");
        buf.push(0);
        buf.extend_from_slice(&[0u8; 15]);
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&1i32.to_be_bytes());
        let abbr = format!("{name}\0");
        buf.extend_from_slice(&(abbr.len() as i32).to_be_bytes());
        buf.extend_from_slice(&offset.to_be_bytes());
        buf.push(0);
        buf.push(0);
        buf.extend_from_slice(abbr.as_bytes());
        buf
    }

    #[test]
    fn default_with_empty_env_is_utc() {
        let source = FakeSource { files: RefCell::new(HashMap::new()) };
        let loc = default_location(&source, &[], Path::new("/etc"), Some(""));
        assert_eq!(loc.name, "UTC");
    }

    #[test]
    fn default_with_named_env_loads_it() {
        let mut files = HashMap::new();
        files.insert(
            PathBuf::from("/zoneinfo/Test/Zone"),
            minimal_tzif("XYZ", 1800),
        );
        let source = FakeSource { files: RefCell::new(files) };
        let loc = default_location(
            &source,
            &[PathBuf::from("/zoneinfo/")],
            Path::new("/etc"),
            Some("Test/Zone"),
        );
        assert_eq!(loc.name, "Test/Zone");
        assert_eq!(loc.zones()[0].offset_seconds_east_of_utc, 1800);
    }

    #[test]
    fn default_falls_back_to_utc_on_load_failure() {
        let source = FakeSource { files: RefCell::new(HashMap::new()) };
        let loc = default_location(
            &source,
            &[PathBuf::from("/zoneinfo/")],
            Path::new("/etc"),
            Some("Nonexistent/Zone"),
        );
        assert_eq!(loc.name, "UTC");
    }

    #[test]
    fn default_with_no_env_reads_localtime_and_renames() {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("/etc/localtime"), minimal_tzif("LOC", -3600));
        let source = FakeSource { files: RefCell::new(files) };
        let loc = default_location(&source, &[], Path::new("/etc"), None);
        assert_eq!(loc.name, "local");
    }
}
