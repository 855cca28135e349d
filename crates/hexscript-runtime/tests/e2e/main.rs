//! End-to-end tests: real loader scripts run through the full lifecycle.

mod harness;

mod event_bus;
mod lib_path;
mod types;
