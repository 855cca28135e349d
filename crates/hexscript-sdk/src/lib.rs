//! hexscript SDK - host contracts for loader scripts
//!
//! This crate holds everything a host needs to hand to a loader script run
//! without depending on the embedded runtime: the data provider and event bus
//! contracts, the data model exchanged across the bridge, and the
//! `ScriptContext` threaded through every host call.
//!
//! # Example
//!
//! ```ignore
//! use hexscript_sdk::{HostEvent, MemoryProvider, ScriptContext};
//!
//! let mut provider = MemoryProvider::new("blob", vec![0u8; 64]);
//! let mut events: Vec<HostEvent> = Vec::new();
//! let ctx = ScriptContext::new("loader.lua", &mut provider, &mut events);
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod event;
pub mod provider;
pub mod types;

pub use context::ScriptContext;
pub use error::{HostError, HostResult};
pub use event::{EventBus, HostEvent};
pub use provider::{DataProvider, MemoryProvider};
pub use types::{Bookmark, Declaration, DeclarationKind, Member, PatchRequest, TypeDescriptor};
