//! Process lifecycle around the roster: open, run the pump, shut down.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::autosave::AutosavePump;
use crate::config::AppConfig;
use crate::roster::RosterStore;
use crate::storage::FileRosterStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    /// The pump reached `Stopped` within the join timeout.
    pub pump_joined: bool,
    pub final_save: bool,
}

pub struct Session {
    store: Arc<RosterStore>,
    pump: Option<AutosavePump>,
    join_timeout: Duration,
}

impl Session {
    /// Loads (or seeds) the roster named by `config` and starts autosaving.
    pub fn open(config: &AppConfig) -> std::io::Result<Self> {
        let storage = FileRosterStorage::new(&config.storage_path);
        let store = RosterStore::open(Box::new(storage), config.capacity, config.seed);
        Self::start(
            Arc::new(store),
            config.autosave_interval(),
            config.shutdown_join_timeout(),
        )
    }

    pub fn start(
        store: Arc<RosterStore>,
        interval: Duration,
        join_timeout: Duration,
    ) -> std::io::Result<Self> {
        let pump = AutosavePump::start(Arc::clone(&store), interval)?;
        Ok(Self {
            store,
            pump: Some(pump),
            join_timeout,
        })
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Stops the pump, waits for it up to the join timeout and then performs
    /// the final save. The final save happens even when the join times out.
    pub fn close(mut self) -> ShutdownReport {
        self.shutdown()
    }

    fn shutdown(&mut self) -> ShutdownReport {
        let pump_joined = match self.pump.take() {
            Some(mut pump) => {
                let joined = pump.shutdown(self.join_timeout);
                if !joined {
                    warn!(
                        state = ?pump.state(),
                        "proceeding with shutdown while autosave is still running"
                    );
                }
                info!(
                    completed = pump.completed_ticks(),
                    failed = pump.failed_ticks(),
                    "autosave ticks"
                );
                joined
            }
            None => true,
        };

        let final_save = self.store.save();
        info!(
            pump_joined,
            final_save,
            saves = self.store.completed_saves(),
            "application closed and final data saved"
        );
        ShutdownReport {
            pump_joined,
            final_save,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.pump.is_some() {
            self.shutdown();
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/session.rs"]
mod tests;
