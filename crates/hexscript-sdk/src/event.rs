//! EventBus trait — forwarding host call results to the application
//!
//! The bridge never stores bookmarks or declarations. It posts them here and
//! the application decides what to do with them.

use crossbeam::channel::Sender;
use serde::Serialize;

use crate::types::Bookmark;

/// Events posted by host calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Register a bookmark
    AddBookmark(Bookmark),
    /// Append source text to the pattern editor
    AppendPatternCode {
        /// Declaration source text
        code: String,
    },
}

impl HostEvent {
    /// Event name, as used in the `event` tag of its JSON form
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::AddBookmark(_) => "add_bookmark",
            HostEvent::AppendPatternCode { .. } => "append_pattern_code",
        }
    }
}

/// Sink for host events.
///
/// Posting is synchronous and must not block across threads.
pub trait EventBus {
    /// Deliver one event
    fn post(&mut self, event: HostEvent);
}

/// Collects events in posting order.
impl EventBus for Vec<HostEvent> {
    fn post(&mut self, event: HostEvent) {
        self.push(event);
    }
}

/// Forwards events to another thread, typically the UI thread.
impl EventBus for Sender<HostEvent> {
    fn post(&mut self, event: HostEvent) {
        let name = event.name();
        if self.send(event).is_err() {
            log::warn!("event receiver disconnected, dropping {} event", name);
        }
    }
}
