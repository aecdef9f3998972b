//! Layout error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid gap: {0} (must be finite and >= 0)")]
    InvalidGap(f32),

    #[error("invalid max row height: {0} (must be finite and > 0)")]
    InvalidMaxRowHeight(f32),

    #[error("invalid column count: {0} (must be >= 1)")]
    InvalidColumns(usize),

    #[error("invalid visibility threshold: {0} (must be finite and >= 0)")]
    InvalidThreshold(f32),

    #[error("unknown layout mode: {0}")]
    UnknownMode(String),

    #[error("scene error: {0}")]
    Scene(#[from] serde_json::Error),
}
