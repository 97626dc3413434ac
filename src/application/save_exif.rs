// SPDX-License-Identifier: MPL-2.0
//! EXIF save use case.
//!
//! [`ExifService`] owns the parser bound at startup and runs the save flow
//! for one media record inside a caller-provided transaction:
//!
//! 1. A media record that already links an EXIF record gets it back from the
//!    store, untouched.
//! 2. Otherwise the bound parser extracts metadata from the file.
//! 3. The record is sanitized and stored, and the media record is linked to it.
//! 4. When the file carries a capture date that differs from the stored one,
//!    the media record's `date_shot` is updated.
//!
//! The service never commits: the caller decides what to do with the
//! transaction once `save_exif` returns.

use tracing::{debug, warn};

use crate::application::port::{ExifParser, MediaTransaction};
use crate::domain::exif::{sanitize_exif, ExifRecord};
use crate::domain::media::MediaRecord;
use crate::error::{Error, Result};

/// Explicit replacement for a process-wide parser binding.
///
/// Built once by the host and shared by reference. There is no way to swap
/// the parser of an existing service.
#[derive(Debug, Clone)]
pub struct ExifService<P> {
    parser: Option<P>,
}

impl<P: ExifParser> ExifService<P> {
    /// Creates a service bound to `parser`.
    #[must_use]
    pub fn new(parser: P) -> Self {
        Self {
            parser: Some(parser),
        }
    }

    /// Creates a service with no parser, as if parser selection never ran.
    ///
    /// Saves on an unbound service fail with [`Error::NoParser`] unless the
    /// media record is already linked.
    #[must_use]
    pub fn unbound() -> Self {
        Self { parser: None }
    }

    /// Returns the bound parser.
    #[must_use]
    pub fn parser(&self) -> Option<&P> {
        self.parser.as_ref()
    }

    /// Extracts, sanitizes and stores the EXIF metadata of `media`.
    ///
    /// Returns `Ok(None)` when the file has no metadata. Nothing is written in
    /// that case, nor when `media` already links an EXIF record.
    ///
    /// # Errors
    ///
    /// Each step maps its failure to a distinct [`Error`] variant. Only
    /// [`Error::UpdateDateShot`] follows a successful write; it carries the
    /// stored record.
    #[tracing::instrument(level = "debug", skip_all, fields(media = %media.id))]
    pub fn save_exif<T>(&self, tx: &mut T, media: &mut MediaRecord) -> Result<Option<ExifRecord>>
    where
        T: MediaTransaction + ?Sized,
    {
        if let Some(exif_id) = media.exif_id {
            debug!(media = %media.id, exif = %exif_id, "EXIF already stored");
            return tx
                .find_exif(exif_id)
                .map(Some)
                .map_err(|source| Error::FetchExif {
                    media: media.id,
                    source,
                });
        }

        let parser = self.parser.as_ref().ok_or(Error::NoParser)?;

        debug!(media = %media.id, path = %media.path.display(), "Parsing EXIF");
        let parsed = parser.parse(&media.path).map_err(|source| Error::Parse {
            path: media.path.clone(),
            source,
        })?;

        let Some(record) = parsed else {
            debug!(media = %media.id, "No EXIF data found");
            return Ok(None);
        };

        let record = sanitize_exif(record);
        let saved = tx
            .replace_exif(media, record)
            .map_err(|source| Error::SaveExif {
                media: media.id,
                source,
            })?;
        debug!(media = %media.id, exif = ?saved.id, "EXIF stored");

        if let Some(date_shot) = saved.date_shot {
            if date_shot != media.date_shot {
                let delta = date_shot.signed_duration_since(media.date_shot);
                if delta.num_milliseconds().abs() < 1000 {
                    warn!(
                        media = %media.id,
                        stored = %media.date_shot,
                        extracted = %date_shot,
                        "Capture dates differ below one second"
                    );
                }

                media.date_shot = date_shot;
                if let Err(source) = tx.save_media(media) {
                    return Err(Error::UpdateDateShot {
                        media: media.id,
                        exif: Box::new(saved),
                        source,
                    });
                }
                debug!(media = %media.id, date_shot = %date_shot, "Capture date updated");
            }
        }

        Ok(Some(saved))
    }
}
