// SPDX-License-Identifier: MPL-2.0
//! Float sanitization for EXIF values.
//!
//! Optical tags are stored as rationals, and some cameras write a zero
//! denominator (shutter speed markers in particular). Decoders surface those as
//! IEEE-754 infinities or NaN, which most persistent numeric columns reject.

use super::ExifRecord;

/// Maps a value to a finite one.
///
/// - `+inf` becomes `f64::MAX`
/// - `-inf` becomes `-f64::MAX`
/// - `NaN` becomes `0.0`
///
/// Finite values are returned unchanged.
#[must_use]
pub fn sanitize_float(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value == f64::INFINITY {
        f64::MAX
    } else if value == f64::NEG_INFINITY {
        -f64::MAX
    } else {
        value
    }
}

/// Sanitizes every numeric field of an EXIF record.
///
/// Text, integer and date fields pass through untouched. Applying this twice
/// yields the same record as applying it once.
#[must_use]
pub fn sanitize_exif(exif: ExifRecord) -> ExifRecord {
    ExifRecord {
        exposure: exif.exposure.map(sanitize_float),
        aperture: exif.aperture.map(sanitize_float),
        focal_length: exif.focal_length.map(sanitize_float),
        gps_latitude: exif.gps_latitude.map(sanitize_float),
        gps_longitude: exif.gps_longitude.map(sanitize_float),
        ..exif
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn positive_infinity_becomes_max() {
        assert_eq!(sanitize_float(f64::INFINITY), f64::MAX);
    }

    #[test]
    fn negative_infinity_becomes_negated_max() {
        assert_eq!(sanitize_float(f64::NEG_INFINITY), -f64::MAX);
        assert_eq!(sanitize_float(f64::NEG_INFINITY), f64::MIN);
    }

    #[test]
    fn nan_becomes_zero() {
        assert_eq!(sanitize_float(f64::NAN), 0.0);
    }

    #[test]
    fn finite_values_pass_through() {
        for v in [0.0, -0.0, 1.0 / 250.0, 2.8, -33.8688, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(sanitize_float(v).to_bits(), v.to_bits());
        }
    }

    fn dirty_record() -> ExifRecord {
        ExifRecord {
            camera: Some("X-T4".to_string()),
            maker: Some("FUJIFILM".to_string()),
            date_shot: NaiveDate::from_ymd_opt(2021, 6, 1).and_then(|d| d.and_hms_opt(12, 0, 0)),
            exposure: Some(f64::INFINITY),
            aperture: Some(f64::NAN),
            iso: Some(400),
            focal_length: Some(23.0),
            gps_latitude: Some(f64::NEG_INFINITY),
            gps_longitude: None,
            ..ExifRecord::default()
        }
    }

    #[test]
    fn sanitize_exif_rewrites_only_numeric_fields() {
        let original = dirty_record();
        let clean = sanitize_exif(original.clone());

        assert_eq!(clean.exposure, Some(f64::MAX));
        assert_eq!(clean.aperture, Some(0.0));
        assert_eq!(clean.focal_length, Some(23.0));
        assert_eq!(clean.gps_latitude, Some(-f64::MAX));
        assert_eq!(clean.gps_longitude, None);

        assert_eq!(clean.camera, original.camera);
        assert_eq!(clean.maker, original.maker);
        assert_eq!(clean.date_shot, original.date_shot);
        assert_eq!(clean.iso, original.iso);
        assert!(clean.is_finite());
    }

    #[test]
    fn sanitize_exif_is_idempotent() {
        let once = sanitize_exif(dirty_record());
        let twice = sanitize_exif(once.clone());
        assert_eq!(once, twice);
    }

    proptest! {
        #[test]
        fn sanitized_value_is_always_finite(bits in any::<u64>()) {
            let v = f64::from_bits(bits);
            prop_assert!(sanitize_float(v).is_finite());
        }

        #[test]
        fn finite_values_are_fixed_points(v in any::<f64>()) {
            prop_assume!(v.is_finite());
            prop_assert_eq!(sanitize_float(v).to_bits(), v.to_bits());
        }
    }
}
