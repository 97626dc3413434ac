// SPDX-License-Identifier: MPL-2.0
//! EXIF date parsing shared by both parser adapters.
//!
//! EXIF stores wall-clock time without a zone ("2024:01:15 14:30:00"). Values
//! that carry an offset keep their local part, so both adapters produce the
//! same representation for the same file.

use chrono::{DateTime, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y:%m:%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

const OFFSET_FORMATS: &[&str] = &["%Y:%m:%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Parses an EXIF date/time string.
///
/// Accepts the EXIF layout with optional sub-seconds and an optional UTC
/// offset (`Z` or `+hh:mm`). Returns `None` for blank placeholders such as
/// `"0000:00:00 00:00:00"` and anything else that is not a real date.
pub fn parse_exif_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim().trim_matches('"').trim_end_matches('\0').trim();
    if s.is_empty() {
        return None;
    }

    let s = match s.strip_suffix('Z') {
        Some(stripped) => return parse_naive(stripped),
        None => s,
    };

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.naive_local());
        }
    }

    parse_naive(s)
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}
