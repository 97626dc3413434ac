// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Parser**: External tool probing
//! - **Logging**: Default verbosity

// ==========================================================================
// Parser Defaults
// ==========================================================================

/// Program probed for the external EXIF parser, looked up on `PATH`.
pub const DEFAULT_EXIFTOOL_PROGRAM: &str = "exiftool";

/// Whether the external parser is preferred when available.
pub const DEFAULT_USE_EXIFTOOL: bool = true;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default log filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Levels accepted by the `log_level` setting.
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_EXIFTOOL_PROGRAM.is_empty());
    assert!(!DEFAULT_LOG_LEVEL.is_empty());
    assert!(!LOG_LEVELS.is_empty());
};
