// SPDX-License-Identifier: MPL-2.0
use crate::application::port::{ParseError, StoreError};
use crate::domain::exif::ExifRecord;
use crate::domain::media::MediaId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the EXIF service and its configuration layer.
///
/// Every save failure names the step that failed. A file without metadata is
/// not an error.
#[derive(Debug, Error)]
pub enum Error {
    /// A save was attempted before any parser was bound.
    #[error("no exif parser initialized")]
    NoParser,

    /// The media record links an EXIF record that could not be loaded.
    #[error("get EXIF for {media} from database")]
    FetchExif {
        media: MediaId,
        #[source]
        source: StoreError,
    },

    /// The bound parser failed on the media file.
    #[error("failed to parse exif data of {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Persisting the new EXIF record or its link failed. Nothing was written.
    #[error("save {media} exif to database")]
    SaveExif {
        media: MediaId,
        #[source]
        source: StoreError,
    },

    /// The EXIF record was saved and linked, but the capture date update on
    /// the media record failed.
    #[error("update {media} date_shot")]
    UpdateDateShot {
        media: MediaId,
        /// The record that was already persisted.
        exif: Box<ExifRecord>,
        #[source]
        source: StoreError,
    },

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` when some writes of a save already happened.
    ///
    /// Only the capture date update can fail after the EXIF record was stored.
    /// A caller retrying such a save only needs to persist the media record.
    #[must_use]
    pub fn is_partial_write(&self) -> bool {
        matches!(self, Error::UpdateDateShot { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
