//! hexscript Runtime
//!
//! Runs Lua loader scripts against an opened binary. Scripts reach the host
//! through the `hex` module:
//!
//! ```lua
//! local hex = require("hex")
//! local u32 = hex.HexType:extend("u32")
//! local Header = hex.HexType:extend("Header", { { "magic", u32 } })
//!
//! hex.patch(0x00, "\x7fELF")
//! hex.add_bookmark(0x00, 4, "magic", "ELF magic")
//! hex.add_struct(Header)
//! ```

pub mod args;
pub mod error;
pub mod host_api;
pub mod interpreter;
pub mod options;
pub mod prelude;
pub mod reflect;
pub mod registry;
pub mod translate;

pub use error::RuntimeError;
pub use interpreter::{is_runtime_active, Interpreter, RunReport};
pub use options::{host_environment, HostEnvironment, RuntimeOptions};
pub use reflect::LuaReflector;
pub use registry::MODULE_NAME;
pub use translate::{translate, ClassReflector};
