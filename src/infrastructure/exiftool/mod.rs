// SPDX-License-Identifier: MPL-2.0
//! `exiftool` adapter implementing the [`ExifParser`] port trait.
//!
//! This module provides [`ExiftoolParser`], which runs the external `exiftool`
//! executable once per file and decodes its JSON output.
//!
//! # Design Notes
//!
//! - Availability is probed once, at construction, with `exiftool -ver`
//! - Each parse spawns `exiftool -json -n <path>` and waits for it; there is
//!   no timeout at this layer
//! - `-n` disables print conversion, so optical values come back as numbers
//!   (seconds, f-number, millimeters) rather than display strings
//!
//! [`ExifParser`]: crate::application::port::ExifParser

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::application::port::{ExifParser, ParseError};
use crate::domain::exif::ExifRecord;
use crate::infrastructure::exif_date::parse_exif_datetime;

/// Error messages exiftool reports for files it cannot extract anything from.
/// These mean "no metadata", not "broken backend".
const NO_METADATA_ERRORS: &[&str] = &["Unknown file type", "File format error", "File is empty"];

/// `exiftool`-based parser implementing the [`ExifParser`] trait.
///
/// # Thread Safety
///
/// The parser only holds the program name and the probed version, so it is
/// `Send + Sync`. Concurrent calls spawn independent processes.
///
/// # Example
///
/// ```ignore
/// use media_exif::infrastructure::ExiftoolParser;
/// use media_exif::application::port::ExifParser;
///
/// let parser = ExiftoolParser::new("exiftool")?;
/// println!("using exiftool {}", parser.version());
/// let exif = parser.parse(Path::new("photo.jpg"))?;
/// ```
#[derive(Debug, Clone)]
pub struct ExiftoolParser {
    program: OsString,
    version: String,
}

impl ExiftoolParser {
    /// Locates `program` and probes its version.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ToolUnavailable`] if the program cannot be spawned,
    /// exits with a failure, or prints no version.
    pub fn new(program: impl AsRef<OsStr>) -> Result<Self, ParseError> {
        let program = program.as_ref().to_os_string();
        let unavailable = |reason: String| ParseError::ToolUnavailable {
            program: program.to_string_lossy().into_owned(),
            reason,
        };

        let output = Command::new(&program)
            .arg("-ver")
            .output()
            .map_err(|e| unavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(unavailable(format!(
                "version probe exited with {}",
                output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            return Err(unavailable("version probe printed nothing".to_string()));
        }

        Ok(Self { program, version })
    }

    /// Returns the version string reported by the probe.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the program this parser invokes.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Decodes the JSON printed by `exiftool -json -n` for a single file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Decode`] if the output is not the expected JSON
    /// array, or [`ParseError::ToolFailed`] if exiftool reported an error other
    /// than an unsupported or empty file.
    pub fn decode_json(path: &Path, stdout: &[u8]) -> Result<Option<ExifRecord>, ParseError> {
        if stdout.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let entries: Vec<Map<String, Value>> =
            serde_json::from_slice(stdout).map_err(|e| ParseError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let Some(tags) = entries.into_iter().next() else {
            return Ok(None);
        };

        if let Some(message) = tags.get("Error").and_then(Value::as_str) {
            if NO_METADATA_ERRORS.iter().any(|known| message.contains(known)) {
                debug!(path = %path.display(), reason = message, "exiftool found no metadata");
                return Ok(None);
            }
            return Err(ParseError::ToolFailed {
                path: path.to_path_buf(),
                message: message.to_string(),
            });
        }

        let exif = record_from_tags(&tags);
        if exif.is_empty() {
            return Ok(None);
        }
        Ok(Some(exif))
    }
}

impl ExifParser for ExiftoolParser {
    fn parse(&self, path: &Path) -> Result<Option<ExifRecord>, ParseError> {
        trace!(path = %path.display(), "running exiftool");

        let output = Command::new(&self.program)
            .args(["-json", "-n"])
            .arg(path)
            .output()
            .map_err(|source| ParseError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        // exiftool exits non-zero for unsupported files but still prints JSON
        // with an "Error" entry, so the output is inspected before the status.
        if !output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Self::decode_json(path, &output.stdout);
        }

        if output.status.success() {
            return Ok(None);
        }

        Err(ParseError::ToolFailed {
            path: path.to_path_buf(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Maps exiftool tag names onto an [`ExifRecord`].
fn record_from_tags(tags: &Map<String, Value>) -> ExifRecord {
    let get_str = |key: &str| -> Option<String> {
        let value = tags.get(key)?;
        let s = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!s.is_empty()).then_some(s)
    };
    let get_f64 = |key: &str| tags.get(key).and_then(value_as_f64);
    let get_i64 = |key: &str| tags.get(key).and_then(value_as_i64);

    let date_shot = ["DateTimeOriginal", "CreateDate"]
        .iter()
        .filter_map(|key| tags.get(*key).and_then(Value::as_str))
        .find_map(parse_exif_datetime);

    ExifRecord {
        id: None,
        camera: get_str("Model"),
        maker: get_str("Make"),
        lens: get_str("LensModel"),
        date_shot,
        exposure: get_f64("ExposureTime"),
        aperture: get_f64("FNumber").or_else(|| get_f64("Aperture")),
        iso: get_i64("ISO"),
        focal_length: get_f64("FocalLength"),
        flash: get_i64("Flash"),
        orientation: get_i64("Orientation"),
        exposure_program: get_i64("ExposureProgram"),
        gps_latitude: signed_coordinate(get_f64("GPSLatitude"), get_str("GPSLatitudeRef"), 'S'),
        gps_longitude: signed_coordinate(get_f64("GPSLongitude"), get_str("GPSLongitudeRef"), 'W'),
    }
}

/// Reads a number, or a numeric string such as `"inf"` or `"1/0"`.
fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses decimal and rational strings. A zero denominator yields an
/// infinity or NaN, which the sanitizer deals with later.
fn parse_numeric_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.trim().parse().ok()?;
        let den: f64 = den.trim().parse().ok()?;
        return Some(num / den);
    }
    s.parse().ok()
}

/// Applies the hemisphere reference when exiftool returned an unsigned value.
fn signed_coordinate(value: Option<f64>, reference: Option<String>, negative: char) -> Option<f64> {
    let value = value?;
    let southern_or_western = reference
        .as_deref()
        .and_then(|r| r.trim().chars().next())
        .is_some_and(|c| c.eq_ignore_ascii_case(&negative));
    if southern_or_western && value > 0.0 {
        Some(-value)
    } else {
        Some(value)
    }
}
