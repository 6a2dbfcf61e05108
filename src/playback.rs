//! Ownership of the live loop buffer and its playback handle.
//!
//! The controller is the sole owner of the installed [`SampleBuffer`]; every
//! other component only ever holds a buffer it produced itself, until it
//! hands it to [`PlaybackController::install`] and stops touching it.

use crate::buffer::SampleBuffer;

/// Opaque identifier for one looping voice inside an [`AudioSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkHandle(pub u64);

/// Seam between the controller and the audio backend.
///
/// The real implementation is [`Mixer`](crate::sink::Mixer); tests use a
/// recording fake.
pub trait AudioSink {
    /// Begin looping `buffer` and return a handle to the new voice.
    fn start_loop(&mut self, buffer: &SampleBuffer) -> SinkHandle;

    /// Stop and discard a voice. Unknown handles are ignored.
    fn stop(&mut self, handle: SinkHandle);

    /// Shared output gain, >= 0.
    fn set_gain(&mut self, gain: f32);

    /// Suspend or resume the device clock. While suspended, voices keep
    /// their position and produce silence.
    fn set_running(&mut self, running: bool);
}

/// Process-wide playback state.
///
/// `Stopped` exists only before the first play request and is never
/// re-entered; afterwards the state toggles between `Suspended` and
/// `Running`. Installing a buffer never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Suspended,
    Running,
}

/// Owns the currently installed buffer and its live voice.
pub struct PlaybackController<S: AudioSink> {
    sink: S,
    state: PlaybackState,
    current: Option<SampleBuffer>,
    handle: Option<SinkHandle>,
    gain: f32,
}

impl<S: AudioSink> PlaybackController<S> {
    pub fn new(mut sink: S) -> Self {
        sink.set_running(false);
        sink.set_gain(1.0);
        Self {
            sink,
            state: PlaybackState::Stopped,
            current: None,
            handle: None,
            gain: 1.0,
        }
    }

    /// Replace the sounding loop with `buffer`, without a gap.
    ///
    /// The new voice is started before the old one is stopped, so there is
    /// never a moment with nothing installed. Play/pause state is left
    /// alone; if the device is suspended the new voice is simply inaudible
    /// until resumed.
    pub fn install(&mut self, buffer: SampleBuffer) {
        let new_handle = self.sink.start_loop(&buffer);
        if let Some(old) = self.handle.replace(new_handle) {
            self.sink.stop(old);
        }
        self.current = Some(buffer);
    }

    /// Set the shared output gain. Negative values are clamped to zero.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.max(0.0);
        self.sink.set_gain(self.gain);
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Suspended (or initial Stopped) -> Running, Running -> Suspended.
    pub fn toggle_playback(&mut self) {
        self.state = match self.state {
            PlaybackState::Stopped | PlaybackState::Suspended => {
                self.sink.set_running(true);
                PlaybackState::Running
            }
            PlaybackState::Running => {
                self.sink.set_running(false);
                PlaybackState::Suspended
            }
        };
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Read view of the installed buffer, for rendering, export, and as
    /// mutation input. Callers copy before transforming.
    pub fn current(&self) -> Option<&SampleBuffer> {
        self.current.as_ref()
    }
}
