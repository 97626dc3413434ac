// SPDX-License-Identifier: MPL-2.0
//! Domain layer - media and EXIF records plus the numeric sanitization rules.
//!
//! This module contains pure domain types and value objects. Apart from
//! `chrono` for capture timestamps it has no dependency on external crates,
//! so every rule here can be tested without a store or a parser.
//!
//! # Modules
//!
//! - [`exif`]: EXIF record ([`ExifRecord`](exif::ExifRecord)) and the float
//!   sanitizer ([`sanitize_exif`](exif::sanitize_exif))
//! - [`media`]: Media record ([`MediaRecord`](media::MediaRecord)) and identifiers

pub mod exif;
pub mod media;
