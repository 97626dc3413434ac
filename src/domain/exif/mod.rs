// SPDX-License-Identifier: MPL-2.0
//! EXIF domain types.
//!
//! [`ExifRecord`] is the structured result of an extraction. Parsers create it,
//! [`sanitize_exif`] normalizes it, and the store persists it once per media item.

pub mod sanitize;

pub use sanitize::{sanitize_exif, sanitize_float};

use crate::domain::media::ExifId;
use chrono::NaiveDateTime;

// =============================================================================
// ExifRecord
// =============================================================================

/// EXIF metadata extracted from a media file.
///
/// All fields are optional since cameras, phones and editors each write a
/// different subset of tags. After [`sanitize_exif`] every `f64` field is finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifRecord {
    /// Assigned by the store when the record is persisted.
    pub id: Option<ExifId>,

    /// Camera model (e.g., "EOS 5D Mark IV").
    pub camera: Option<String>,
    /// Camera manufacturer (e.g., "Canon").
    pub maker: Option<String>,
    /// Lens model.
    pub lens: Option<String>,

    /// Date and time the photo was taken, as recorded by the camera.
    pub date_shot: Option<NaiveDateTime>,

    /// Exposure time in seconds.
    pub exposure: Option<f64>,
    /// Aperture f-number.
    pub aperture: Option<f64>,
    /// ISO sensitivity.
    pub iso: Option<i64>,
    /// Focal length in millimeters.
    pub focal_length: Option<f64>,
    /// Raw EXIF flash value.
    pub flash: Option<i64>,
    /// EXIF orientation tag (1-8).
    pub orientation: Option<i64>,
    /// Raw EXIF exposure program value.
    pub exposure_program: Option<i64>,

    /// Latitude in decimal degrees, negative south of the equator.
    pub gps_latitude: Option<f64>,
    /// Longitude in decimal degrees, negative west of Greenwich.
    pub gps_longitude: Option<f64>,
}

impl ExifRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no metadata field is set. The id is not considered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.camera.is_none()
            && self.maker.is_none()
            && self.lens.is_none()
            && self.date_shot.is_none()
            && self.exposure.is_none()
            && self.aperture.is_none()
            && self.iso.is_none()
            && self.focal_length.is_none()
            && self.flash.is_none()
            && self.orientation.is_none()
            && self.exposure_program.is_none()
            && self.gps_latitude.is_none()
            && self.gps_longitude.is_none()
    }

    /// Returns `true` if both GPS coordinates are present.
    #[must_use]
    pub fn has_gps(&self) -> bool {
        self.gps_latitude.is_some() && self.gps_longitude.is_some()
    }

    /// Returns `true` if every numeric field is finite or absent.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.exposure,
            self.aperture,
            self.focal_length,
            self.gps_latitude,
            self.gps_longitude,
        ]
        .iter()
        .flatten()
        .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record() {
        let exif = ExifRecord::new();
        assert!(exif.is_empty());
        assert!(!exif.has_gps());

        let mut exif = ExifRecord::new();
        exif.maker = Some("Canon".to_string());
        assert!(!exif.is_empty());
    }

    #[test]
    fn id_alone_does_not_make_a_record_non_empty() {
        let exif = ExifRecord {
            id: Some(ExifId(1)),
            ..ExifRecord::default()
        };
        assert!(exif.is_empty());
    }

    #[test]
    fn gps_requires_both_coordinates() {
        let mut exif = ExifRecord::new();
        exif.gps_latitude = Some(48.8566);
        assert!(!exif.has_gps());
        exif.gps_longitude = Some(2.3522);
        assert!(exif.has_gps());
    }

    #[test]
    fn is_finite_ignores_missing_fields() {
        let mut exif = ExifRecord::new();
        assert!(exif.is_finite());
        exif.aperture = Some(f64::NAN);
        assert!(!exif.is_finite());
    }
}
