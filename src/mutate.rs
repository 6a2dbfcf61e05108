//! Per-sample mutation operators.
//!
//! Each operator transforms a sample slice in place and clamps every output
//! sample into [-1.0, 1.0]. They are meant to run on a working copy of the
//! live loop, once per scheduler tick; the same small step applied over and
//! over is what produces the drifting timbre. `amount` scales the step and
//! its sign flips the direction — the library puts no bounds on it (the
//! UI's slider range is a presentation convention, not a contract).

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Step size per unit of `amount` for the incremental operators.
const STEP: f32 = 0.01;

/// A named per-sample transform applied repeatedly to evolve the sound.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Drift toward a sine shape.
    Sinify,
    /// Drift toward a square shape.
    Squarify,
    /// Impose a linear downward ramp, skewing toward a sawtooth.
    Peakify,
    /// Decay amplitude toward silence.
    Nullify,
    /// DC-shift the whole buffer.
    Offsettify,
    /// Three-point moving average; softens harmonics. Ignores `amount`.
    Smoothify,
    /// Add symmetric random jitter.
    Noisify,
    /// Replace the content with white noise. Ignores `amount`.
    Randomizify,
}

impl MutationKind {
    pub const ALL: [MutationKind; 8] = [
        MutationKind::Sinify,
        MutationKind::Squarify,
        MutationKind::Peakify,
        MutationKind::Nullify,
        MutationKind::Offsettify,
        MutationKind::Smoothify,
        MutationKind::Noisify,
        MutationKind::Randomizify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MutationKind::Sinify => "sinify",
            MutationKind::Squarify => "squarify",
            MutationKind::Peakify => "peakify",
            MutationKind::Nullify => "nullify",
            MutationKind::Offsettify => "offsettify",
            MutationKind::Smoothify => "smoothify",
            MutationKind::Noisify => "noisify",
            MutationKind::Randomizify => "randomizify",
        }
    }

    /// The next kind in display order, wrapping around.
    pub fn next(self) -> MutationKind {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Apply this operator to `samples` in place.
    pub fn apply(self, samples: &mut [f32], amount: f32) {
        match self {
            MutationKind::Sinify => sinify(samples, amount),
            MutationKind::Squarify => squarify(samples, amount),
            MutationKind::Peakify => peakify(samples, amount),
            MutationKind::Nullify => nullify(samples, amount),
            MutationKind::Offsettify => offsettify(samples, amount),
            MutationKind::Smoothify => smoothify(samples),
            MutationKind::Noisify => noisify(samples, amount),
            MutationKind::Randomizify => randomizify(samples),
        }
    }
}

#[inline]
fn clamp_unit(sample: f32) -> f32 {
    sample.clamp(-1.0, 1.0)
}

/// Add a scaled single-cycle sine to the buffer.
pub fn sinify(samples: &mut [f32], amount: f32) {
    let n = samples.len() as f32;
    for (i, s) in samples.iter_mut().enumerate() {
        *s = clamp_unit(*s + (std::f32::consts::TAU * i as f32 / n).sin() * STEP * amount);
    }
}

/// Push the first half up and the second half down.
pub fn squarify(samples: &mut [f32], amount: f32) {
    let half = samples.len() / 2;
    for (i, s) in samples.iter_mut().enumerate() {
        let step = STEP * amount;
        *s = clamp_unit(if i < half { *s + step } else { *s - step });
    }
}

/// Subtract a ramp that grows with the index.
pub fn peakify(samples: &mut [f32], amount: f32) {
    for (i, s) in samples.iter_mut().enumerate() {
        *s = clamp_unit(*s - i as f32 * 0.0001 * amount);
    }
}

/// Move every sample a fixed step toward zero.
///
/// A step larger than the sample overshoots through zero; repeated
/// application then oscillates within one step of silence.
pub fn nullify(samples: &mut [f32], amount: f32) {
    let step = STEP * amount;
    for s in samples.iter_mut() {
        if *s > 0.0 {
            *s = clamp_unit(*s - step);
        } else if *s < 0.0 {
            *s = clamp_unit(*s + step);
        }
    }
}

/// DC-shift the whole buffer.
pub fn offsettify(samples: &mut [f32], amount: f32) {
    let step = STEP * amount;
    for s in samples.iter_mut() {
        *s = clamp_unit(*s + step);
    }
}

/// Three-point circular moving average.
pub fn smoothify(samples: &mut [f32]) {
    let n = samples.len();
    if n < 2 {
        return;
    }
    let source = samples.to_vec();
    for i in 0..n {
        let prev = source[(i + n - 1) % n];
        let next = source[(i + 1) % n];
        samples[i] = clamp_unit((prev + source[i] + next) / 3.0);
    }
}

/// Add jitter uniform in ±0.01·amount to every sample.
pub fn noisify(samples: &mut [f32], amount: f32) {
    let mut rng = rand::thread_rng();
    for s in samples.iter_mut() {
        let jitter = (2.0 * rng.gen::<f32>() - 1.0) * STEP * amount;
        *s = clamp_unit(*s + jitter);
    }
}

/// Replace every sample with an independent uniform draw in [-1, 1).
pub fn randomizify(samples: &mut [f32]) {
    let mut rng = rand::thread_rng();
    for s in samples.iter_mut() {
        *s = rng.gen_range(-1.0..1.0);
    }
}
