//! ScriptContext — per-run state threaded through every host call
//!
//! A context borrows the opened data and the event bus for exactly one
//! script run. Building one requires both, so no host call can observe a
//! half-initialised context.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::event::{EventBus, HostEvent};
use crate::provider::DataProvider;

/// State for a single loader script run.
pub struct ScriptContext<'a> {
    script_path: PathBuf,
    provider: &'a mut dyn DataProvider,
    events: &'a mut dyn EventBus,
    events_posted: usize,
    patches_applied: usize,
}

impl<'a> ScriptContext<'a> {
    /// Create a context for running `script_path` against `provider`.
    pub fn new(
        script_path: impl Into<PathBuf>,
        provider: &'a mut dyn DataProvider,
        events: &'a mut dyn EventBus,
    ) -> Self {
        Self {
            script_path: script_path.into(),
            provider,
            events,
            events_posted: 0,
            patches_applied: 0,
        }
    }

    /// Path of the script being run
    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    /// Size of the opened data
    pub fn data_size(&self) -> u64 {
        self.provider.size()
    }

    /// Write bytes through to the provider and count the patch.
    ///
    /// Range validation is the caller's job.
    pub fn write(&mut self, offset: u64, data: &[u8]) {
        self.provider.write(offset, data);
        self.patches_applied += 1;
    }

    /// Post an event to the bus and count it.
    pub fn post(&mut self, event: HostEvent) {
        self.events.post(event);
        self.events_posted += 1;
    }

    /// Events posted so far in this run
    pub fn events_posted(&self) -> usize {
        self.events_posted
    }

    /// Patches written so far in this run
    pub fn patches_applied(&self) -> usize {
        self.patches_applied
    }
}

impl fmt::Debug for ScriptContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptContext")
            .field("script_path", &self.script_path)
            .field("provider", &self.provider.name())
            .field("events_posted", &self.events_posted)
            .field("patches_applied", &self.patches_applied)
            .finish()
    }
}
