// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Tracing subscriber setup
//!
//! Logs go to stderr; stdout is reserved for command output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

/// Build the filter: `RUST_LOG` directives plus the base level
#[must_use]
pub fn env_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(level.into())
}

/// Install the global fmt subscriber at the given level
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(level: tracing::Level) -> Result<(), TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_includes_base_level() {
        let filter = env_filter(tracing::Level::DEBUG);
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init(tracing::Level::WARN);
        assert!(init(tracing::Level::WARN).is_err());
    }
}
