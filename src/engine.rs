//! The owned context tying controller, scheduler and mutation parameters
//! together. All control-surface events funnel through here; nothing in the
//! crate keeps ambient global state.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};
use crate::export;
use crate::mutate::MutationKind;
use crate::playback::{AudioSink, PlaybackController, PlaybackState};
use crate::scheduler::{MutationScheduler, ScheduleState};
use crate::wave::{self, WaveKind};

/// The operator and step scale the next tick will apply.
#[derive(Debug, Clone, Copy)]
struct MutationParams {
    kind: MutationKind,
    amount: f32,
}

/// Engine facade over the playback controller and mutation scheduler.
///
/// Generic over the sink so scenario tests run against a recording fake
/// instead of a device.
pub struct Engine<S: AudioSink> {
    controller: Arc<Mutex<PlaybackController<S>>>,
    scheduler: MutationScheduler,
    params: Arc<Mutex<MutationParams>>,
    sample_rate: u32,
    tick_period: Duration,
}

impl<S: AudioSink + Send + 'static> Engine<S> {
    pub fn new(sink: S, sample_rate: u32) -> Self {
        Self {
            controller: Arc::new(Mutex::new(PlaybackController::new(sink))),
            scheduler: MutationScheduler::new(),
            params: Arc::new(Mutex::new(MutationParams {
                kind: MutationKind::Sinify,
                amount: 5.0,
            })),
            sample_rate,
            tick_period: MutationScheduler::DEFAULT_PERIOD,
        }
    }

    /// Override the mutation tick period (builder style).
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Generate a fresh loop and install it, replacing the current sound.
    pub fn regenerate(&self, frequency: f32, kind: WaveKind) -> Result<()> {
        let buffer = wave::generate(frequency, kind, self.sample_rate)?;
        self.controller.lock().unwrap().install(buffer);
        Ok(())
    }

    pub fn toggle_playback(&self) {
        self.controller.lock().unwrap().toggle_playback();
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.controller.lock().unwrap().state()
    }

    pub fn set_gain(&self, gain: f32) {
        self.controller.lock().unwrap().set_gain(gain);
    }

    /// Select the operator applied on subsequent ticks.
    pub fn set_mutation(&self, kind: MutationKind) {
        self.params.lock().unwrap().kind = kind;
    }

    pub fn mutation(&self) -> MutationKind {
        self.params.lock().unwrap().kind
    }

    /// Set the signed amount scalar. Any finite value is accepted; UI
    /// slider bounds are not the library's concern.
    pub fn set_amount(&self, amount: f32) {
        self.params.lock().unwrap().amount = amount;
    }

    pub fn amount(&self) -> f32 {
        self.params.lock().unwrap().amount
    }

    pub fn mutation_state(&self) -> ScheduleState {
        self.scheduler.state()
    }

    /// Arm the mutation tick. Runs one cycle immediately, then one per
    /// period. No-op while already active.
    pub fn start_mutation(&mut self) {
        let controller = Arc::clone(&self.controller);
        let params = Arc::clone(&self.params);
        self.scheduler.start(self.tick_period, move || {
            let MutationParams { kind, amount } = *params.lock().unwrap();
            let mut controller = controller.lock().unwrap();
            // Copy, transform the copy, install. The live buffer is never
            // touched in place.
            let (mut working, sample_rate) = match controller.current() {
                Some(current) => (current.samples().to_vec(), current.sample_rate()),
                None => return,
            };
            kind.apply(&mut working, amount);
            controller.install(SampleBuffer::from_samples(working, sample_rate));
        });
    }

    /// Disarm the mutation tick; returns with no cycle in flight.
    pub fn stop_mutation(&mut self) {
        self.scheduler.stop();
    }

    pub fn toggle_mutation(&mut self) {
        match self.scheduler.state() {
            ScheduleState::Idle => self.start_mutation(),
            ScheduleState::Active => self.stop_mutation(),
        }
    }

    /// Clone of the installed buffer, for rendering and export.
    pub fn snapshot(&self) -> Option<SampleBuffer> {
        self.controller.lock().unwrap().current().cloned()
    }

    /// Write the current loop to a mono PCM WAV file.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let buffer = self.snapshot().ok_or(Error::NothingToExport)?;
        export::write_wav(&buffer, path)
    }
}
