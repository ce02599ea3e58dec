//! Error types for danmaku.
//!
//! The simulation itself cannot fail; only configuration coming from the
//! outside (command line, settings files) is validated.

use thiserror::Error;

/// Errors produced while reading game configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Difficulty level outside the 0-3 table.
    #[error("unknown difficulty level {0}, expected 0-3")]
    UnknownLevel(u8),
    /// Difficulty given as text that is neither a level nor a known name.
    #[error("unknown difficulty '{0}', expected 0-3 or easy/normal/hard/lunatic")]
    UnknownName(String),
}
