//! Runtime error types.

use std::path::PathBuf;

use hexscript_sdk::HostError;

/// Errors that can end a loader script run.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The script file could not be read
    #[error("Cannot open script {}: {source}", path.display())]
    Resource {
        /// Script path as given by the caller
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The script raised an error, either its own or one from a host call
    #[error("Script error: {0}")]
    Script(mlua::Error),

    /// Setting up the runtime failed before the script started
    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),

    /// A runtime is already live in this process
    #[error("Another loader script is already running")]
    Busy,
}

impl RuntimeError {
    /// The host call error that aborted the script, if that is what happened.
    pub fn host_error(&self) -> Option<&HostError> {
        match self {
            RuntimeError::Script(err) | RuntimeError::Lua(err) => find_host_error(err),
            _ => None,
        }
    }
}

/// Dig a `HostError` out of a Lua error raised by a host callback.
pub fn find_host_error(err: &mlua::Error) -> Option<&HostError> {
    match err {
        mlua::Error::ExternalError(inner) => inner.downcast_ref::<HostError>(),
        mlua::Error::CallbackError { cause, .. } => find_host_error(cause),
        _ => None,
    }
}
