//! Error taxonomy.
//!
//! Range violations are never errors; out-of-range samples are silently
//! clamped at the point they are computed.

use thiserror::Error;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Frequency must be positive and finite.
    #[error("invalid frequency: {0} (must be positive and finite)")]
    InvalidFrequency(f32),

    /// No default audio output device. Fatal at startup, never retried.
    #[error("no default audio output device available")]
    NoOutputDevice,

    /// The output device rejected its default stream config.
    #[error("failed to query default output config: {0}")]
    OutputConfig(#[from] cpal::DefaultStreamConfigError),

    /// The output stream could not be built.
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    /// The output stream refused to start.
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    /// WAV export failed.
    #[error("wav export failed: {0}")]
    Export(#[from] hound::Error),

    /// Export requested before any buffer was installed.
    #[error("nothing to export: no buffer installed")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, Error>;
