// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`save_exif`]: The EXIF save use case and its service object
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The binary wires adapters into [`save_exif::ExifService`]
//!
//! # Example
//!
//! ```ignore
//! use media_exif::application::save_exif::ExifService;
//! use media_exif::infrastructure::{InternalExifParser, MemoryStore};
//!
//! let service = ExifService::new(InternalExifParser::new());
//! let store = MemoryStore::new();
//! let mut tx = store.begin();
//! let exif = service.save_exif(&mut tx, &mut media)?;
//! tx.commit();
//! ```

pub mod port;
pub mod save_exif;

pub use save_exif::ExifService;
