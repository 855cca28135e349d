//! Loader script lifecycle.
//!
//! One run boots a fresh Lua state, registers the host module, executes the
//! script file to completion and tears the state down again. The state lives
//! in a [`RuntimeHandle`] whose drop closes it, so teardown happens on every
//! exit path: normal completion, a guest error, or a script that could not
//! be opened.
//!
//! # Example
//!
//! ```rust,ignore
//! use hexscript_runtime::{Interpreter, RuntimeOptions};
//! use hexscript_sdk::{HostEvent, MemoryProvider, ScriptContext};
//!
//! let mut provider = MemoryProvider::open("firmware.bin".as_ref())?;
//! let mut events: Vec<HostEvent> = Vec::new();
//! let ctx = ScriptContext::new("loader.lua", &mut provider, &mut events);
//! let report = Interpreter::new(RuntimeOptions::default()).run(ctx)?;
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use hexscript_sdk::ScriptContext;
use mlua::{Lua, Table};
use parking_lot::{Mutex, MutexGuard};

use crate::error::RuntimeError;
use crate::options::{self, HostEnvironment, RuntimeOptions};
use crate::{prelude, registry};

/// Held for as long as a runtime is alive in this process.
static RUN_LOCK: Mutex<()> = Mutex::new(());

/// Whether a loader script runtime is currently alive.
pub fn is_runtime_active() -> bool {
    RUN_LOCK.is_locked()
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Script that was run
    pub script: PathBuf,
    /// Events posted to the bus
    pub events_posted: usize,
    /// Patches written to the provider
    pub patches_applied: usize,
}

/// Runs loader scripts with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    options: RuntimeOptions,
}

impl Interpreter {
    /// Create an interpreter.
    pub fn new(options: RuntimeOptions) -> Self {
        Self { options }
    }

    /// Options this interpreter runs with
    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    /// Run the context's script to completion.
    ///
    /// Only one run may be live per process; a second concurrent call fails
    /// with [`RuntimeError::Busy`]. Errors raised by the script, including
    /// host call errors, end the run and come back as
    /// [`RuntimeError::Script`].
    pub fn run(&self, ctx: ScriptContext<'_>) -> Result<RunReport, RuntimeError> {
        let script = ctx.script_path().to_path_buf();
        let env = options::host_environment();

        let handle = RuntimeHandle::boot(&self.options, env, &script)?;
        let ctx = RefCell::new(ctx);
        let result = handle.execute(&ctx, &script);
        drop(handle);

        let ctx = ctx.into_inner();
        match result {
            Ok(()) => {
                log::debug!(
                    "{} finished: {} events, {} patches",
                    script.display(),
                    ctx.events_posted(),
                    ctx.patches_applied()
                );
                Ok(RunReport {
                    script,
                    events_posted: ctx.events_posted(),
                    patches_applied: ctx.patches_applied(),
                })
            }
            Err(err) => {
                log::warn!("{} failed: {}", script.display(), err);
                Err(err)
            }
        }
    }
}

// ============================================================================
// RuntimeHandle
// ============================================================================

/// A live Lua state plus the process-wide run lock.
///
/// Field order matters: the state is closed before the lock is released.
struct RuntimeHandle {
    lua: Lua,
    _lock: MutexGuard<'static, ()>,
}

impl RuntimeHandle {
    /// Take the run lock and bring up a configured Lua state.
    fn boot(
        options: &RuntimeOptions,
        env: &HostEnvironment,
        script: &Path,
    ) -> Result<Self, RuntimeError> {
        let lock = RUN_LOCK.try_lock().ok_or(RuntimeError::Busy)?;
        let handle = Self {
            lua: Lua::new(),
            _lock: lock,
        };
        log::debug!("booted runtime for {}", script.display());

        handle.set_identity(options.program_name(env), script)?;
        if let Some(home) = options.home_dir(env) {
            handle.relocate_home(home)?;
        }
        prelude::load_marker(&handle.lua)?;
        handle.prepend_search_path(&options.lib_dir)?;
        Ok(handle)
    }

    /// Expose the program and script names the way the standalone `lua`
    /// binary does: `arg[-1]` is the program, `arg[0]` the script.
    fn set_identity(&self, program: &str, script: &Path) -> mlua::Result<()> {
        let arg = self.lua.create_table()?;
        arg.raw_set(-1, program)?;
        arg.raw_set(0, script.to_string_lossy().into_owned())?;
        self.lua.globals().set("arg", arg)
    }

    /// Replace the default module path with the bundled library under `home`.
    fn relocate_home(&self, home: &Path) -> mlua::Result<()> {
        let package = self.package()?;
        let path = options::search_entries(&options::stdlib_dir(home));
        log::debug!("runtime home set to {}", home.display());
        package.set("path", path)
    }

    /// Search `dir` before every other module location.
    fn prepend_search_path(&self, dir: &Path) -> mlua::Result<()> {
        let package = self.package()?;
        let current: String = package.get("path")?;
        let path = if current.is_empty() {
            options::search_entries(dir)
        } else {
            format!("{};{}", options::search_entries(dir), current)
        };
        package.set("path", path)
    }

    fn package(&self) -> mlua::Result<Table<'_>> {
        self.lua.globals().get("package")
    }

    /// Read the script, register the host module and run the script.
    fn execute(
        &self,
        ctx: &RefCell<ScriptContext<'_>>,
        script: &Path,
    ) -> Result<(), RuntimeError> {
        let source = std::fs::read(script).map_err(|source| RuntimeError::Resource {
            path: script.to_path_buf(),
            source,
        })?;

        let outcome = self.lua.scope(|scope| {
            registry::register_host_module(&self.lua, scope, ctx)?;
            Ok(self
                .lua
                .load(source.as_slice())
                .set_name(format!("@{}", script.display()))
                .exec())
        })?;
        outcome.map_err(RuntimeError::Script)
    }
}

impl Drop for RuntimeHandle {
    fn drop(&mut self) {
        log::debug!("finalizing runtime");
    }
}
