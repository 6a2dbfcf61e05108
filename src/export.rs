//! WAV export of the current loop buffer.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::buffer::SampleBuffer;
use crate::error::Result;

/// Write `buffer` as a mono 16-bit PCM WAV file at its sample rate.
///
/// Read-only with respect to the core; invoked only on explicit user
/// request.
pub fn write_wav<P: AsRef<Path>>(buffer: &SampleBuffer, path: P) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in buffer.samples() {
        writer.write_sample((sample * f32::from(i16::MAX)) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SampleBuffer;
    use crate::wave::{self, WaveKind};

    #[test]
    fn written_file_round_trips_length_and_rate() {
        let buffer = wave::generate(440.0, WaveKind::Sine, 44_100).unwrap();
        let path = std::env::temp_dir().join("driftloop-export-test.wav");

        write_wav(&buffer, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len() as usize, buffer.len());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn samples_survive_quantization_within_tolerance() {
        let buffer = SampleBuffer::from_samples(vec![0.0, 0.5, -0.5, 1.0], 48_000);
        let path = std::env::temp_dir().join("driftloop-export-quant-test.wav");

        write_wav(&buffer, &path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let read: Vec<f32> = reader
            .samples::<i16>()
            .map(|s| f32::from(s.unwrap()) / f32::from(i16::MAX))
            .collect();
        for (&want, got) in buffer.samples().iter().zip(read) {
            assert!((want - got).abs() < 1e-3);
        }

        std::fs::remove_file(&path).ok();
    }
}
