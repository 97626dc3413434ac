// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the abstract interfaces that infrastructure adapters
//! implement. The traits use domain types only, so the save orchestration
//! never depends on a concrete parser or store.
//!
//! # Available Ports
//!
//! - [`parser`]: EXIF extraction from a media file path
//! - [`store`]: Transactional persistence of media and EXIF records
//!
//! # Design Notes
//!
//! - [`ExifParser`] is `Send + Sync` and takes `&self`, so one parser serves
//!   every worker thread
//! - [`MediaTransaction`] takes `&mut self`: a transaction belongs to one caller
//! - Methods return `Result` with port-specific error types

pub mod parser;
pub mod store;

// Re-export main types for convenience
pub use parser::{ExifParser, ParseError};
pub use store::{MediaTransaction, StoreError};
