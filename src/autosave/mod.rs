//! Background autosave.
//!
//! The pump owns one worker thread whose loop is: wait on a condition
//! variable for up to one interval, and save if the pump is still running
//! when the wait ends. [`AutosavePump::request_stop`] flips the state and
//! signals the condition variable, so a pending wait is cut short instead of
//! running out the interval.
//!
//! ```text
//!   Running --request_stop--> Stopping --loop exit--> Stopped
//! ```
//!
//! The pump never performs a final save of its own. The shutdown path stops
//! the pump, joins it with a bounded timeout and then saves once (see
//! [`crate::session::Session::close`]).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::roster::RosterStore;
use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Running,
    Stopping,
    Stopped,
}

/// Something the pump can save on each tick.
pub trait SaveTarget: Send + Sync + 'static {
    fn autosave(&self) -> Result<(), StorageError>;
}

impl SaveTarget for RosterStore {
    fn autosave(&self) -> Result<(), StorageError> {
        self.try_save().map(|_| ())
    }
}

struct Shared {
    state: Mutex<PumpState>,
    signal: Condvar,
    ticks: AtomicU64,
    failed_ticks: AtomicU64,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PumpState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_stopped(&self) {
        *self.lock() = PumpState::Stopped;
        self.signal.notify_all();
    }
}

/// Marks the pump stopped when the worker leaves its loop, including by
/// unwinding, so joiners are never left waiting on a dead thread.
struct StopOnExit<'a>(&'a Shared);

impl Drop for StopOnExit<'_> {
    fn drop(&mut self) {
        self.0.set_stopped();
    }
}

pub struct AutosavePump {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl AutosavePump {
    /// Spawns the worker thread. The pump is `Running` on return.
    pub fn start<T: SaveTarget>(target: Arc<T>, interval: Duration) -> std::io::Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(PumpState::Running),
            signal: Condvar::new(),
            ticks: AtomicU64::new(0),
            failed_ticks: AtomicU64::new(0),
        });

        let worker = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("autosave".to_string())
            .spawn(move || run_loop(&worker, &*target, interval))?;

        info!(interval_ms = interval.as_millis() as u64, "autosave pump started");
        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    pub fn state(&self) -> PumpState {
        *self.shared.lock()
    }

    /// Ticks whose save completed.
    pub fn completed_ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::SeqCst)
    }

    /// Ticks whose save failed; the loop kept going after each of them.
    pub fn failed_ticks(&self) -> u64 {
        self.shared.failed_ticks.load(Ordering::SeqCst)
    }

    /// Asks the worker to stop and wakes it if it is waiting. Only the first
    /// call has any effect.
    pub fn request_stop(&self) {
        let mut state = self.shared.lock();
        if *state == PumpState::Running {
            *state = PumpState::Stopping;
            self.shared.signal.notify_all();
            debug!("autosave stop requested");
        }
    }

    /// Waits up to `timeout` for the worker to reach `Stopped`, then reaps the
    /// thread. Returns `false` if the worker did not stop in time; the thread
    /// is then left detached.
    pub fn join_timeout(&mut self, timeout: Duration) -> bool {
        let started = Instant::now();
        let guard = self.shared.lock();
        let (guard, _) = self
            .shared
            .signal
            .wait_timeout_while(guard, timeout, |state| *state != PumpState::Stopped)
            .unwrap_or_else(PoisonError::into_inner);
        let stopped = *guard == PumpState::Stopped;
        drop(guard);

        if !stopped {
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                "autosave thread did not stop in time"
            );
            return false;
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("autosave thread panicked");
            }
        }
        debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            "autosave thread joined"
        );
        true
    }

    /// `request_stop` followed by `join_timeout`.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.request_stop();
        self.join_timeout(timeout)
    }
}

impl Drop for AutosavePump {
    fn drop(&mut self) {
        self.request_stop();
    }
}

fn run_loop(shared: &Shared, target: &dyn SaveTarget, interval: Duration) {
    let _exit = StopOnExit(shared);

    loop {
        let guard = shared.lock();
        let (guard, _) = shared
            .signal
            .wait_timeout_while(guard, interval, |state| *state == PumpState::Running)
            .unwrap_or_else(PoisonError::into_inner);
        if *guard != PumpState::Running {
            debug!("autosave wait interrupted by stop request");
            break;
        }
        drop(guard);

        match target.autosave() {
            Ok(()) => {
                shared.ticks.fetch_add(1, Ordering::SeqCst);
                info!("autosave complete");
            }
            Err(err) => {
                shared.failed_ticks.fetch_add(1, Ordering::SeqCst);
                warn!(error = %err, "autosave failed, will retry next interval");
            }
        }
    }

    info!("autosave pump shut down");
}

#[cfg(test)]
#[path = "../../tests/src_inline/autosave/tests.rs"]
mod tests;
