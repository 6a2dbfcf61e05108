//! Single-cycle waveform generation.

use std::f32::consts::TAU;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};

/// Noise buffers span this many nominal periods so the loop point is not
/// audible as a pitch of its own.
pub const NOISE_PERIODS: usize = 32;

/// The canonical shape used to synthesize an initial loop buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Sine,
    Saw,
    Square,
    Noise,
}

impl WaveKind {
    pub const ALL: [WaveKind; 4] = [
        WaveKind::Sine,
        WaveKind::Saw,
        WaveKind::Square,
        WaveKind::Noise,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WaveKind::Sine => "sine",
            WaveKind::Saw => "saw",
            WaveKind::Square => "square",
            WaveKind::Noise => "noise",
        }
    }

    /// The next kind in display order, wrapping around.
    pub fn next(self) -> WaveKind {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Generate one loop cycle of `kind` at `frequency` Hz.
///
/// The period is rounded to a whole number of samples, so the requested
/// frequency is only approximately honored; the buffer's own
/// [`frequency`](SampleBuffer::frequency) reports the exact playback pitch.
/// Noise buffers are [`NOISE_PERIODS`] periods long, each sample an
/// independent uniform draw.
///
/// Fails fast with [`Error::InvalidFrequency`] on a non-positive or
/// non-finite frequency rather than producing a NaN-length buffer.
pub fn generate(frequency: f32, kind: WaveKind, sample_rate: u32) -> Result<SampleBuffer> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(Error::InvalidFrequency(frequency));
    }

    let period = (sample_rate as f32 / frequency).round().max(1.0) as usize;

    let samples = match kind {
        WaveKind::Sine => {
            let n = period as f32;
            (0..period).map(|i| (TAU * i as f32 / n).sin()).collect()
        }
        WaveKind::Saw => {
            let n = period as f32;
            (0..period).map(|i| 1.0 - 2.0 * i as f32 / n).collect()
        }
        WaveKind::Square => (0..period)
            .map(|i| if i < period / 2 { 1.0 } else { -1.0 })
            .collect(),
        WaveKind::Noise => {
            let mut rng = rand::thread_rng();
            (0..period * NOISE_PERIODS)
                .map(|_| rng.gen_range(-1.0..1.0))
                .collect()
        }
    };

    Ok(SampleBuffer::from_samples(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_length_is_rounded_rate_over_frequency() {
        // 44100 / 440 = 100.23 -> 100 samples
        let buf = generate(440.0, WaveKind::Sine, 44_100).unwrap();
        assert_eq!(buf.len(), 100);
    }

    #[test]
    fn sine_starts_at_zero_and_peaks_at_quarter_period() {
        let buf = generate(440.0, WaveKind::Sine, 44_100).unwrap();
        assert!(buf.samples()[0].abs() < 1e-6);
        assert!((buf.samples()[25] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn square_is_plus_one_then_minus_one() {
        let buf = generate(441.0, WaveKind::Square, 44_100).unwrap();
        let n = buf.len();
        assert!(buf.samples()[..n / 2].iter().all(|&s| s == 1.0));
        assert!(buf.samples()[n / 2..].iter().all(|&s| s == -1.0));
    }

    #[test]
    fn saw_ramps_down_from_one() {
        let buf = generate(441.0, WaveKind::Saw, 44_100).unwrap();
        assert_eq!(buf.samples()[0], 1.0);
        for w in buf.samples().windows(2) {
            assert!(w[1] < w[0]);
        }
        assert!(*buf.samples().last().unwrap() > -1.0);
    }

    #[test]
    fn noise_is_thirty_two_periods_long_and_in_range() {
        let buf = generate(440.0, WaveKind::Noise, 44_100).unwrap();
        assert_eq!(buf.len(), 100 * NOISE_PERIODS);
        assert!(buf.samples().iter().all(|s| (-1.0..=1.0).contains(s)));
        // Sanity check against a frozen RNG: draws must not all coincide.
        let first = buf.samples()[0];
        assert!(buf.samples().iter().any(|&s| s != first));
    }

    #[test]
    fn all_kinds_stay_in_range() {
        for kind in WaveKind::ALL {
            let buf = generate(523.25, kind, 48_000).unwrap();
            assert!(buf.samples().iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn very_high_frequency_still_yields_at_least_one_sample() {
        let buf = generate(96_000.0, WaveKind::Sine, 48_000).unwrap();
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn rejects_non_positive_and_non_finite_frequency() {
        for f in [0.0, -440.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                generate(f, WaveKind::Sine, 48_000),
                Err(Error::InvalidFrequency(_))
            ));
        }
    }
}
