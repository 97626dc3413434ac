// SPDX-License-Identifier: MPL-2.0
//! Parser selection.
//!
//! The host calls [`ExifService::from_config`] (or [`select_parser`]) once at
//! startup.
//! The returned value owns the chosen parser for the rest of the process:
//! nothing re-probes exiftool afterwards, so a tool installed later is not
//! picked up until restart.

use std::path::Path;

use tracing::{info, warn};

use crate::application::port::{ExifParser, ParseError};
use crate::application::save_exif::ExifService;
use crate::config::ExifConfig;
use crate::domain::exif::ExifRecord;
use crate::infrastructure::exiftool::ExiftoolParser;
use crate::infrastructure::internal::InternalExifParser;

/// Which backend a [`BoundParser`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    Exiftool,
    Internal,
}

impl ParserKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ParserKind::Exiftool => "exiftool",
            ParserKind::Internal => "internal",
        }
    }
}

/// The parser chosen at startup.
#[derive(Debug, Clone)]
pub enum BoundParser {
    /// External `exiftool`, preferred for its wider format coverage.
    Exiftool(ExiftoolParser),
    /// In-process fallback.
    Internal(InternalExifParser),
}

impl BoundParser {
    #[must_use]
    pub fn kind(&self) -> ParserKind {
        match self {
            BoundParser::Exiftool(_) => ParserKind::Exiftool,
            BoundParser::Internal(_) => ParserKind::Internal,
        }
    }
}

impl ExifParser for BoundParser {
    fn parse(&self, path: &Path) -> Result<Option<ExifRecord>, ParseError> {
        match self {
            BoundParser::Exiftool(parser) => parser.parse(path),
            BoundParser::Internal(parser) => parser.parse(path),
        }
    }
}

/// Probes for exiftool and binds the best available parser.
///
/// Logs one line naming the bound parser, and the reason when falling back.
#[must_use]
pub fn select_parser(config: &ExifConfig) -> BoundParser {
    if !config.use_exiftool {
        warn!("exiftool disabled by configuration, using internal exif parser instead");
        return BoundParser::Internal(InternalExifParser::new());
    }

    match ExiftoolParser::new(&config.exiftool_program) {
        Ok(parser) => {
            info!(version = parser.version(), "Found exiftool");
            BoundParser::Exiftool(parser)
        }
        Err(err) => {
            warn!("Failed to get exiftool, using internal exif parser instead: {err}");
            BoundParser::Internal(InternalExifParser::new())
        }
    }
}

impl ExifService<BoundParser> {
    /// Builds the process-wide EXIF service around the selected parser.
    #[must_use]
    pub fn from_config(config: &ExifConfig) -> Self {
        Self::new(select_parser(config))
    }
}
