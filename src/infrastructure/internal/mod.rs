// SPDX-License-Identifier: MPL-2.0
//! In-process EXIF decoder implementing the [`ExifParser`] port trait.
//!
//! [`InternalExifParser`] reads EXIF from JPEG, PNG, WebP, TIFF and HEIF
//! containers with `kamadak-exif`. It covers fewer tag types than exiftool and
//! cannot read most RAW or video formats, but it needs nothing outside the
//! process and constructing it never fails.
//!
//! [`ExifParser`]: crate::application::port::ExifParser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Exif, Field, In, Reader, Tag, Value};
use tracing::{debug, trace};

use crate::application::port::{ExifParser, ParseError};
use crate::domain::exif::ExifRecord;
use crate::infrastructure::exif_date::parse_exif_datetime;

/// Fallback EXIF parser built on `kamadak-exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalExifParser;

impl InternalExifParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ExifParser for InternalExifParser {
    fn parse(&self, path: &Path) -> Result<Option<ExifRecord>, ParseError> {
        let file = File::open(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let read = Reader::new()
            .continue_on_error(true)
            .read_from_container(&mut reader)
            .or_else(|err| {
                err.distill_partial_result(|errors| {
                    for e in errors {
                        trace!(path = %path.display(), error = %e, "ignored broken EXIF entry");
                    }
                })
            });

        let exif = match read {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_) | exif::Error::InvalidFormat(_) | exif::Error::NotSupported(_)) => {
                debug!(path = %path.display(), "no EXIF data found");
                return Ok(None);
            }
            Err(exif::Error::Io(source)) => {
                return Err(ParseError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(err) => {
                return Err(ParseError::Decode {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })
            }
        };

        let record = record_from_exif(&exif);
        if record.is_empty() {
            return Ok(None);
        }
        Ok(Some(record))
    }
}

/// Builds an [`ExifRecord`] from the primary image's fields.
fn record_from_exif(exif: &Exif) -> ExifRecord {
    let field = |tag: Tag| exif.get_field(tag, In::PRIMARY);

    let date_shot = [Tag::DateTimeOriginal, Tag::DateTimeDigitized]
        .into_iter()
        .filter_map(|tag| field(tag).and_then(ascii_value))
        .find_map(|s| parse_exif_datetime(&s));

    ExifRecord {
        id: None,
        camera: field(Tag::Model).and_then(ascii_value),
        maker: field(Tag::Make).and_then(ascii_value),
        lens: field(Tag::LensModel).and_then(ascii_value),
        date_shot,
        exposure: field(Tag::ExposureTime).and_then(|f| rational_value(&f.value)),
        aperture: field(Tag::FNumber).and_then(|f| rational_value(&f.value)),
        iso: field(Tag::PhotographicSensitivity).and_then(uint_value),
        focal_length: field(Tag::FocalLength).and_then(|f| rational_value(&f.value)),
        flash: field(Tag::Flash).and_then(uint_value),
        orientation: field(Tag::Orientation).and_then(uint_value),
        exposure_program: field(Tag::ExposureProgram).and_then(uint_value),
        gps_latitude: gps_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, 'S'),
        gps_longitude: gps_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, 'W'),
    }
}

/// Reads the first string of an ASCII field, without quotes or padding.
fn ascii_value(field: &Field) -> Option<String> {
    match &field.value {
        Value::Ascii(strings) => {
            let s = String::from_utf8_lossy(strings.first()?);
            let s = s.trim_end_matches('\0').trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => None,
    }
}

fn uint_value(field: &Field) -> Option<i64> {
    field.value.get_uint(0).map(i64::from)
}

/// Converts the first rational of a value to `f64`.
///
/// The raw quotient is kept, so `n/0` yields an infinity and `0/0` yields NaN.
fn rational_value(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(rationals) => rationals.first().map(exif::Rational::to_f64),
        Value::SRational(rationals) => rationals.first().map(exif::SRational::to_f64),
        _ => None,
    }
}

/// Reads a degrees/minutes/seconds coordinate and applies its hemisphere.
fn gps_coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative: char) -> Option<f64> {
    let value = exif.get_field(value_tag, In::PRIMARY)?;
    let degrees = parse_gps_coordinate(&value.value)?;

    let negative_ref = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(ascii_value)
        .and_then(|r| r.chars().next())
        .is_some_and(|c| c.eq_ignore_ascii_case(&negative));

    Some(if negative_ref { -degrees } else { degrees })
}

/// Parses a GPS coordinate from EXIF rational values (degrees, minutes, seconds).
fn parse_gps_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(rationals) if rationals.len() >= 3 => {
            let degrees = rationals[0].to_f64();
            let minutes = rationals[1].to_f64();
            let seconds = rationals[2].to_f64();
            Some(degrees + minutes / 60.0 + seconds / 3600.0)
        }
        _ => None,
    }
}
