// SPDX-License-Identifier: MPL-2.0
//! `media_exif` extracts EXIF metadata from media files and stores it next to
//! the media records of a library.
//!
//! Extraction prefers the external `exiftool` program and falls back to an
//! in-process decoder. Extracted values are sanitized before storage, and a
//! media record's capture date follows the one found in its file.
//!
//! # Example
//!
//! ```no_run
//! use media_exif::application::ExifService;
//! use media_exif::config;
//! use media_exif::domain::media::{MediaId, MediaRecord};
//! use media_exif::infrastructure::MemoryStore;
//!
//! let config = config::load().unwrap_or_default();
//! let service = ExifService::from_config(&config.exif);
//!
//! let store = MemoryStore::new();
//! let mut media = MediaRecord::new(MediaId(1), "photo.jpg", chrono::NaiveDateTime::default());
//! store.insert_media(media.clone());
//!
//! let mut tx = store.begin();
//! if let Ok(Some(exif)) = service.save_exif(&mut tx, &mut media) {
//!     println!("camera: {:?}", exif.camera);
//! }
//! tx.commit();
//! ```

#![doc(html_root_url = "https://docs.rs/media_exif/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::{Error, Result};
