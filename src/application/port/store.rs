// SPDX-License-Identifier: MPL-2.0
//! Store port.
//!
//! The durable store and its transaction manager belong to the host. The EXIF
//! service only needs three operations on an open transaction.

use crate::domain::exif::ExifRecord;
use crate::domain::media::{ExifId, MediaId, MediaRecord};
use thiserror::Error;

// =============================================================================
// StoreError
// =============================================================================

/// Errors reported by a store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No EXIF record exists with this id.
    #[error("{0} not found")]
    NotFound(ExifId),

    /// No media record exists with this id.
    #[error("{0} not found")]
    MediaNotFound(MediaId),

    /// Any other backend failure (connection, constraint, serialization).
    #[error("store backend error: {0}")]
    Backend(String),
}

// =============================================================================
// MediaTransaction Trait
// =============================================================================

/// An open transaction on the media store.
///
/// Isolation and commit semantics are the adapter's. Two callers racing on the
/// same media row are serialized (or not) by the store, never by this crate.
pub trait MediaTransaction {
    /// Loads the EXIF record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id is dangling.
    fn find_exif(&mut self, id: ExifId) -> Result<ExifRecord, StoreError>;

    /// Inserts `exif` and makes it the one EXIF record of `media`.
    ///
    /// Any record previously linked to `media` is superseded. On success the
    /// returned record carries its new id and `media.exif_id` points to it.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the insert or the link update fails. In that
    /// case `media` is left unchanged.
    fn replace_exif(
        &mut self,
        media: &mut MediaRecord,
        exif: ExifRecord,
    ) -> Result<ExifRecord, StoreError>;

    /// Persists every field of `media`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the update fails.
    fn save_media(&mut self, media: &MediaRecord) -> Result<(), StoreError>;
}

impl<T: MediaTransaction + ?Sized> MediaTransaction for &mut T {
    fn find_exif(&mut self, id: ExifId) -> Result<ExifRecord, StoreError> {
        (**self).find_exif(id)
    }

    fn replace_exif(
        &mut self,
        media: &mut MediaRecord,
        exif: ExifRecord,
    ) -> Result<ExifRecord, StoreError> {
        (**self).replace_exif(media, exif)
    }

    fn save_media(&mut self, media: &MediaRecord) -> Result<(), StoreError> {
        (**self).save_media(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        assert_eq!(StoreError::NotFound(ExifId(4)).to_string(), "exif#4 not found");
        assert_eq!(
            StoreError::MediaNotFound(MediaId(2)).to_string(),
            "media#2 not found"
        );
        assert!(StoreError::Backend("disk full".into())
            .to_string()
            .contains("disk full"));
    }

    // Test that the trait is object-safe
    fn _assert_transaction_object_safe(_: &mut dyn MediaTransaction) {}
}
