//! Looping single-cycle waveform engine with live per-sample mutation.
//!
//! A [`SampleBuffer`] holds exactly one loop cycle of audio. The engine
//! generates one from a [`WaveKind`], plays it back in a continuous loop,
//! and while the mutation scheduler is active, applies the selected
//! [`MutationKind`] to a copy of the live buffer on every tick and swaps
//! the copy in without a gap in the sound.

pub mod buffer;
pub mod engine;
pub mod error;
pub mod export;
pub mod mutate;
pub mod playback;
pub mod scheduler;
pub mod sink;
pub mod wave;

pub use buffer::SampleBuffer;
pub use engine::Engine;
pub use error::{Error, Result};
pub use mutate::MutationKind;
pub use wave::WaveKind;
