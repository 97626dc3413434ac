// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like the
//! `exiftool` program, the `kamadak-exif` decoder, and system I/O.
//!
//! # Available Adapters
//!
//! - [`exiftool`]: EXIF extraction via the external tool (implements [`ExifParser`])
//! - [`internal`]: In-process EXIF extraction (implements [`ExifParser`])
//! - [`selector`]: Startup choice between the two parsers
//! - [`memory_store`]: In-memory transactional store (implements [`MediaTransaction`])
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Both parsers share [`exif_date`] so they produce the same dates
//!
//! [`ExifParser`]: crate::application::port::ExifParser
//! [`MediaTransaction`]: crate::application::port::MediaTransaction

pub mod exif_date;
pub mod exiftool;
pub mod internal;
pub mod memory_store;
pub mod selector;

// Re-export main types for convenience
pub use exiftool::ExiftoolParser;
pub use internal::InternalExifParser;
pub use memory_store::{MemoryStore, MemoryTransaction, StoreOperation};
pub use selector::{select_parser, BoundParser, ParserKind};
