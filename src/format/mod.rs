//! Reference-time layouts: tokenizing a layout string and rendering an
//! instant against it (components H and I).
pub mod formatter;
pub mod layout;

pub use formatter::{
    format, ANSIC, KITCHEN, RFC1123, RFC1123Z, RFC3339, RFC3339_NANO, RFC822, RFC822Z, RFC850,
    RUBY_DATE, STAMP, STAMP_MICRO, STAMP_MILLI, STAMP_NANO, UNIX_DATE,
};
