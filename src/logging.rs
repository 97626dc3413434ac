// SPDX-License-Identifier: MPL-2.0
//! Log subscriber setup for the binary.
//!
//! The library only emits `tracing` events. Hosts embedding it install their
//! own subscriber.

use tracing_subscriber::EnvFilter;

/// Installs a formatted subscriber on stderr.
///
/// `RUST_LOG` takes precedence over `level`. An unparsable `level` falls back
/// to [`DEFAULT_LOG_LEVEL`](crate::config::DEFAULT_LOG_LEVEL). Returns `false`
/// when a global subscriber was already installed, which is not an error.
pub fn init(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let _ = init("debug");
        assert!(!init("info"));
    }
}
