//! Audio backend: a shared software mixer driven by a cpal output stream.
//!
//! `cpal::Stream` is not `Send`, so the stream itself stays on the thread
//! that opened it ([`CpalOutput`]) while the cloneable [`Mixer`] half is
//! what the playback controller and the mutation scheduler share.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};
use crate::playback::{AudioSink, SinkHandle};

struct Voice {
    handle: SinkHandle,
    samples: Arc<[f32]>,
    pos: usize,
}

struct Shared {
    voices: Mutex<Vec<Voice>>,
    /// f32 gain stored as bits so the callback never takes a second lock.
    gain_bits: AtomicU32,
    running: AtomicBool,
    next_handle: AtomicU64,
}

/// Cloneable handle to the voice table the output callback mixes from.
///
/// Implements [`AudioSink`]; normally exactly one voice is live, with a
/// short two-voice overlap during a buffer install.
#[derive(Clone)]
pub struct Mixer {
    shared: Arc<Shared>,
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                voices: Mutex::new(Vec::new()),
                gain_bits: AtomicU32::new(1.0f32.to_bits()),
                running: AtomicBool::new(false),
                next_handle: AtomicU64::new(0),
            }),
        }
    }

    /// Mix all live voices into an interleaved output block.
    ///
    /// While suspended the block is silence and voice positions stay put,
    /// so resuming continues where the loop left off. The mono mix is
    /// fanned out to every channel and clamped after summing.
    pub fn fill(&self, out: &mut [f32], channels: usize) {
        out.fill(0.0);
        if channels == 0 || !self.shared.running.load(Ordering::Acquire) {
            return;
        }
        let gain = f32::from_bits(self.shared.gain_bits.load(Ordering::Acquire));
        let frames = out.len() / channels;

        let mut voices = self.shared.voices.lock().unwrap();
        for voice in voices.iter_mut() {
            for frame in 0..frames {
                let sample = voice.samples[voice.pos] * gain;
                voice.pos = (voice.pos + 1) % voice.samples.len();
                let base = frame * channels;
                for ch in 0..channels {
                    out[base + ch] += sample;
                }
            }
        }
        drop(voices);

        for s in out.iter_mut() {
            *s = s.clamp(-1.0, 1.0);
        }
    }

    #[cfg(test)]
    fn voice_count(&self) -> usize {
        self.shared.voices.lock().unwrap().len()
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for Mixer {
    fn start_loop(&mut self, buffer: &SampleBuffer) -> SinkHandle {
        let handle = SinkHandle(self.shared.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        let voice = Voice {
            handle,
            samples: buffer.samples().into(),
            pos: 0,
        };
        self.shared.voices.lock().unwrap().push(voice);
        handle
    }

    fn stop(&mut self, handle: SinkHandle) {
        self.shared
            .voices
            .lock()
            .unwrap()
            .retain(|v| v.handle != handle);
    }

    fn set_gain(&mut self, gain: f32) {
        self.shared
            .gain_bits
            .store(gain.max(0.0).to_bits(), Ordering::Release);
    }

    fn set_running(&mut self, running: bool) {
        self.shared.running.store(running, Ordering::Release);
    }
}

/// Owns the cpal output stream feeding from a [`Mixer`].
///
/// Failing to find a default output device is fatal for the whole system:
/// callers report it once and perform no further initialization.
pub struct CpalOutput {
    _stream: cpal::Stream,
    sample_rate: u32,
}

impl CpalOutput {
    /// Open the default output device and start pulling from `mixer`.
    pub fn start(mixer: Mixer) -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| mixer.fill(data, channels),
            |err| eprintln!("audio error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            _stream: stream,
            sample_rate,
        })
    }

    /// Device sample rate, fixed for the process lifetime.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_buffer() -> SampleBuffer {
        SampleBuffer::from_samples(vec![0.1, 0.2, 0.3, 0.4], 48_000)
    }

    #[test]
    fn suspended_mixer_emits_silence_and_holds_position() {
        let mut mixer = Mixer::new();
        mixer.start_loop(&ramp_buffer());

        let mut out = vec![1.0f32; 8];
        mixer.fill(&mut out, 2);
        assert!(out.iter().all(|&s| s == 0.0));

        // First audible block still starts at the top of the loop.
        mixer.set_running(true);
        mixer.fill(&mut out, 2);
        assert!((out[0] - 0.1).abs() < 1e-6);
        assert!((out[1] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn fill_loops_the_buffer_and_fans_out_to_channels() {
        let mut mixer = Mixer::new();
        mixer.start_loop(&ramp_buffer());
        mixer.set_running(true);

        // 6 frames of a 4-sample loop: wraps back to the start.
        let mut out = vec![0.0f32; 12];
        mixer.fill(&mut out, 2);
        let expected = [0.1, 0.2, 0.3, 0.4, 0.1, 0.2];
        for (frame, &want) in expected.iter().enumerate() {
            assert!((out[frame * 2] - want).abs() < 1e-6);
            assert!((out[frame * 2 + 1] - want).abs() < 1e-6);
        }
    }

    #[test]
    fn gain_scales_and_output_is_clamped() {
        let mut mixer = Mixer::new();
        mixer.start_loop(&ramp_buffer());
        mixer.set_running(true);
        mixer.set_gain(20.0);

        let mut out = vec![0.0f32; 8];
        mixer.fill(&mut out, 1);
        // 0.1 * 20 = 2.0, clamped.
        assert_eq!(out[0], 1.0);
        assert!(out.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn stop_removes_exactly_the_given_voice() {
        let mut mixer = Mixer::new();
        let first = mixer.start_loop(&ramp_buffer());
        let second = mixer.start_loop(&ramp_buffer());
        assert_eq!(mixer.voice_count(), 2);
        mixer.stop(first);
        assert_eq!(mixer.voice_count(), 1);
        // Unknown handles are ignored.
        mixer.stop(first);
        assert_eq!(mixer.voice_count(), 1);
        mixer.stop(second);
        assert_eq!(mixer.voice_count(), 0);
    }
}
