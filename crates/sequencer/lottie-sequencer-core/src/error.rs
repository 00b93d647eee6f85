//! Error types.
//!
//! Sequencer errors never escape the public control surface (`enqueue`, `show_loader`, ...);
//! they are logged and recorded as events. `try_enqueue` exposes them for diagnostics.

use thiserror::Error;

/// Reasons a request produced no playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// Name was not a string, or an empty/blank identifier.
    #[error("invalid animation request: {0}")]
    InvalidRequest(String),
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),
    #[error("playback handle is not mounted")]
    HandleUnavailable,
}

/// Errors produced while loading catalog definitions.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
