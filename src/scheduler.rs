//! Cancellable periodic tick driving the mutate-then-install cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Whether a periodic tick is currently armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Idle,
    Active,
}

struct ActiveTick {
    armed: Arc<AtomicBool>,
    stop_tx: mpsc::Sender<()>,
    thread: JoinHandle<()>,
}

/// Runs a cycle once immediately on `start`, then repeats it at a fixed
/// period until `stop`.
///
/// At most one tick is armed at a time; `start` while Active is a no-op.
/// Cancellation is enforced at the moment a tick fires: the worker checks
/// the armed flag after every wait, so once `stop` returns, no further
/// cycle runs.
pub struct MutationScheduler {
    active: Option<ActiveTick>,
}

impl MutationScheduler {
    /// Tick period used by the engine unless overridden.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(200);

    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn state(&self) -> ScheduleState {
        if self.active.is_some() {
            ScheduleState::Active
        } else {
            ScheduleState::Idle
        }
    }

    /// Arm the periodic tick. The first cycle runs synchronously on the
    /// caller's thread before the timer is armed.
    pub fn start<F>(&mut self, period: Duration, mut cycle: F)
    where
        F: FnMut() + Send + 'static,
    {
        if self.active.is_some() {
            return;
        }

        cycle();

        let armed = Arc::new(AtomicBool::new(true));
        let (stop_tx, stop_rx) = mpsc::channel();
        let worker_armed = Arc::clone(&armed);
        let thread = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if !worker_armed.load(Ordering::Acquire) {
                        break;
                    }
                    cycle();
                }
                // Stop requested, or the scheduler was dropped.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        self.active = Some(ActiveTick {
            armed,
            stop_tx,
            thread,
        });
    }

    /// Disarm and wait for the tick thread. Idempotent; after this returns
    /// no cycle is in flight and none will run.
    pub fn stop(&mut self) {
        if let Some(tick) = self.active.take() {
            tick.armed.store(false, Ordering::Release);
            let _ = tick.stop_tx.send(());
            let _ = tick.thread.join();
        }
    }
}

impl Default for MutationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MutationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
