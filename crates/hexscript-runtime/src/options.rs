//! Runtime configuration and host environment detection.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::Deserialize;

/// Program name used when the process arguments give none
pub const DEFAULT_PROGRAM_NAME: &str = "hexscript";

/// Options for running loader scripts.
///
/// Deserializable so hosts can keep them in a config file; missing keys fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeOptions {
    /// Directory of host-shipped helper modules, searched before anything else
    pub lib_dir: PathBuf,
    /// Program identity reported to scripts as `arg[-1]`
    pub program_name: Option<String>,
    /// Runtime home; its `lib/lua/5.4` replaces the default module path
    pub home_dir: Option<PathBuf>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            lib_dir: PathBuf::from("lib"),
            program_name: None,
            home_dir: None,
        }
    }
}

impl RuntimeOptions {
    /// Program name to report, falling back to the detected one.
    pub fn program_name<'a>(&'a self, env: &'a HostEnvironment) -> &'a str {
        self.program_name.as_deref().unwrap_or(&env.program_name)
    }

    /// Home directory to use, falling back to the detected one.
    pub fn home_dir<'a>(&'a self, env: &'a HostEnvironment) -> Option<&'a Path> {
        self.home_dir.as_deref().or(env.home.as_deref())
    }
}

// ============================================================================
// Host environment
// ============================================================================

/// What the host process looks like, detected once on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    /// Name the host was started as
    pub program_name: String,
    /// Directory next to the executable holding a bundled Lua library
    pub home: Option<PathBuf>,
}

static ENVIRONMENT: OnceCell<HostEnvironment> = OnceCell::new();

/// The host environment, detected on the first call and cached after.
pub fn host_environment() -> &'static HostEnvironment {
    ENVIRONMENT.get_or_init(|| {
        let env = HostEnvironment::detect();
        log::debug!("detected host environment: {:?}", env);
        env
    })
}

impl HostEnvironment {
    /// Inspect the running process.
    pub fn detect() -> Self {
        let exe = std::env::current_exe().ok();
        let program_name = std::env::args_os()
            .next()
            .map(|arg| arg.to_string_lossy().into_owned())
            .or_else(|| exe.as_ref().map(|p| p.to_string_lossy().into_owned()))
            .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string());
        let home = exe
            .as_deref()
            .and_then(Path::parent)
            .and_then(Self::home_from);
        Self { program_name, home }
    }

    /// `exe_dir` if it holds a bundled standard library.
    pub fn home_from(exe_dir: &Path) -> Option<PathBuf> {
        stdlib_dir(exe_dir).is_dir().then(|| exe_dir.to_path_buf())
    }
}

/// Standard library directory under a runtime home
pub fn stdlib_dir(home: &Path) -> PathBuf {
    home.join("lib").join("lua").join("5.4")
}

/// `package.path` entries for modules under `dir`
pub fn search_entries(dir: &Path) -> String {
    format!(
        "{};{}",
        dir.join("?.lua").display(),
        dir.join("?").join("init.lua").display()
    )
}
