//! Test harness for running loader scripts
//!
//! Writes a script to a temporary directory, runs it against an in-memory
//! provider and collects everything the run produced.

use std::path::{Path, PathBuf};

use hexscript_runtime::{
    is_runtime_active, Interpreter, RunReport, RuntimeError, RuntimeOptions,
};
use hexscript_sdk::{HostError, HostEvent, MemoryProvider, ScriptContext};
use parking_lot::{Mutex, MutexGuard};

/// Only one runtime may be live per process; test threads take turns.
static SERIAL: Mutex<()> = Mutex::new(());

/// Hold this while booting a runtime or checking whether one is live.
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock()
}

/// Everything a run left behind.
pub struct Outcome {
    pub result: Result<RunReport, RuntimeError>,
    pub events: Vec<HostEvent>,
    pub data: Vec<u8>,
    pub script: PathBuf,
    /// Whether a runtime was still live once the run returned
    pub runtime_active: bool,
}

impl Outcome {
    /// The run report, panicking with the script error otherwise.
    pub fn report(&self) -> &RunReport {
        match &self.result {
            Ok(report) => report,
            Err(err) => panic!("script failed: {}", err),
        }
    }

    /// The host error that aborted the run.
    pub fn host_error(&self) -> HostError {
        match &self.result {
            Ok(_) => panic!("script succeeded, expected a host error"),
            Err(err) => err
                .host_error()
                .cloned()
                .unwrap_or_else(|| panic!("not a host error: {}", err)),
        }
    }

    /// Source text of every posted declaration, in order.
    pub fn pattern_code(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::AppendPatternCode { code } => Some(code.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// The `lib` directory shipped at the workspace root
pub fn shipped_lib_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../lib")
}

/// Options pointing at the shipped helper modules.
pub fn test_options() -> RuntimeOptions {
    RuntimeOptions {
        lib_dir: shipped_lib_dir(),
        ..RuntimeOptions::default()
    }
}

/// Run `source` against `data` with the default test options.
pub fn run_script(source: &str, data: Vec<u8>) -> Outcome {
    run_script_with(test_options(), source, data)
}

/// Run `source` against `data`.
pub fn run_script_with(options: RuntimeOptions, source: &str, data: Vec<u8>) -> Outcome {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("loader.lua");
    std::fs::write(&script, source).expect("write script");
    run_path_with(options, &script, data)
}

/// Run an existing script file.
pub fn run_path_with(options: RuntimeOptions, script: &Path, data: Vec<u8>) -> Outcome {
    let _serial = serial();

    let mut provider = MemoryProvider::new("test-data", data);
    let mut events: Vec<HostEvent> = Vec::new();
    let ctx = ScriptContext::new(script, &mut provider, &mut events);
    let result = Interpreter::new(options).run(ctx);
    let runtime_active = is_runtime_active();

    Outcome {
        result,
        events,
        data: provider.into_bytes(),
        script: script.to_path_buf(),
        runtime_active,
    }
}
