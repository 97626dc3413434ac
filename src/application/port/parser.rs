// SPDX-License-Identifier: MPL-2.0
//! EXIF parser port.
//!
//! Two adapters implement [`ExifParser`] in `infrastructure`: one shells out to
//! `exiftool`, the other decodes EXIF in-process. Callers cannot tell them apart.

use crate::domain::exif::ExifRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// ParseError
// =============================================================================

/// Errors that can occur while extracting EXIF metadata.
///
/// A file without metadata is not an error: parsers return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The external tool could not be located or version-probed.
    #[error("{program} is unavailable: {reason}")]
    ToolUnavailable { program: String, reason: String },

    /// The external tool ran but reported a failure for this file.
    #[error("exiftool failed on {}: {message}", path.display())]
    ToolFailed { path: PathBuf, message: String },

    /// The file could not be read.
    #[error("could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend produced output that could not be decoded.
    #[error("could not decode metadata of {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
}

// =============================================================================
// ExifParser Trait
// =============================================================================

/// Port for extracting EXIF metadata from a media file.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` and must not keep per-call mutable
/// state: the same parser is called concurrently for distinct paths.
///
/// # Example
///
/// ```ignore
/// use media_exif::application::port::ExifParser;
/// use std::path::Path;
///
/// fn print_camera(parser: &impl ExifParser, path: &Path) {
///     if let Ok(Some(exif)) = parser.parse(path) {
///         if let Some(camera) = exif.camera {
///             println!("Camera: {camera}");
///         }
///     }
/// }
/// ```
pub trait ExifParser: Send + Sync {
    /// Extracts EXIF metadata from the file at `path`.
    ///
    /// Returns `Ok(None)` when the file carries no extractable metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the file cannot be read or the backend
    /// fails irrecoverably.
    fn parse(&self, path: &Path) -> Result<Option<ExifRecord>, ParseError>;
}

impl<P: ExifParser + ?Sized> ExifParser for &P {
    fn parse(&self, path: &Path) -> Result<Option<ExifRecord>, ParseError> {
        (**self).parse(path)
    }
}

impl<P: ExifParser + ?Sized> ExifParser for Box<P> {
    fn parse(&self, path: &Path) -> Result<Option<ExifRecord>, ParseError> {
        (**self).parse(path)
    }
}

impl<P: ExifParser + ?Sized> ExifParser for std::sync::Arc<P> {
    fn parse(&self, path: &Path) -> Result<Option<ExifRecord>, ParseError> {
        (**self).parse(path)
    }
}
