//! One full loop cycle of audio.

/// A fixed-length, amplitude-clamped loop cycle with its sample rate.
///
/// Every sample is in [-1.0, 1.0]; the constructor clamps anything outside.
/// Once installed into playback the buffer is never edited in place — any
/// mutation copies the samples, transforms the copy, and installs that.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Build a buffer, clamping every sample into [-1.0, 1.0].
    ///
    /// `samples` must be non-empty and `sample_rate` non-zero; both are
    /// guaranteed by the generator (length is at least one period).
    pub fn from_samples(mut samples: Vec<f32>, sample_rate: u32) -> Self {
        debug_assert!(!samples.is_empty(), "a loop cycle has at least one sample");
        debug_assert!(sample_rate > 0);
        for s in samples.iter_mut() {
            *s = s.clamp(-1.0, 1.0);
        }
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The frequency this loop plays back at, in Hz: sample_rate / len.
    ///
    /// Only approximately the requested frequency, since the generator
    /// rounds the period to a whole number of samples.
    pub fn frequency(&self) -> f32 {
        self.sample_rate as f32 / self.samples.len() as f32
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
