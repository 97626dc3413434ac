// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! A [`MediaRecord`] is owned by the ingestion pipeline. The EXIF service only
//! touches its EXIF link and its capture date.

use chrono::NaiveDateTime;
use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// Identifiers
// =============================================================================

/// Store identifier of a media record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(pub u64);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media#{}", self.0)
    }
}

/// Store identifier of an EXIF record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExifId(pub u64);

impl fmt::Display for ExifId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exif#{}", self.0)
    }
}

// =============================================================================
// MediaRecord
// =============================================================================

/// A media file known to the library.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    /// Store identifier.
    pub id: MediaId,
    /// Location of the file on disk.
    pub path: PathBuf,
    /// Linked EXIF record, if one has been saved.
    pub exif_id: Option<ExifId>,
    /// Capture date. Starts as whatever the pipeline guessed (usually the
    /// file modification time) and is replaced by the EXIF date once known.
    pub date_shot: NaiveDateTime,
}

impl MediaRecord {
    /// Creates a media record with no EXIF link.
    #[must_use]
    pub fn new(id: MediaId, path: impl Into<PathBuf>, date_shot: NaiveDateTime) -> Self {
        Self {
            id,
            path: path.into(),
            exif_id: None,
            date_shot,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if an EXIF record is already linked.
    #[must_use]
    pub fn has_exif(&self) -> bool {
        self.exif_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    #[test]
    fn new_media_has_no_exif_link() {
        let media = MediaRecord::new(MediaId(7), "/photos/a.jpg", epoch());
        assert!(!media.has_exif());
        assert_eq!(media.path(), Path::new("/photos/a.jpg"));
    }

    #[test]
    fn identifiers_display_with_prefix() {
        assert_eq!(MediaId(3).to_string(), "media#3");
        assert_eq!(ExifId(12).to_string(), "exif#12");
    }
}
