//! Marker class loading.
//!
//! The `HexType` marker is created once per runtime while it boots and is
//! pinned in the Lua registry. Compatibility checks compare
//! against that exact table, so a guest class that merely calls itself
//! `HexType` is not accepted.

use mlua::{Lua, Table};

/// Registry slot holding the marker table
pub const MARKER_KEY: &str = "hexscript.marker";

/// Source of the marker class
pub fn prelude_source() -> &'static str {
    include_str!("prelude.lua")
}

/// Create the marker class in `lua` and pin it in the registry.
pub fn load_marker<'lua>(lua: &'lua Lua) -> mlua::Result<Table<'lua>> {
    let marker: Table = lua
        .load(prelude_source())
        .set_name("=hexscript/prelude")
        .eval()?;
    lua.set_named_registry_value(MARKER_KEY, marker.clone())?;
    Ok(marker)
}

/// The marker pinned by `load_marker`.
pub fn marker<'lua>(lua: &'lua Lua) -> mlua::Result<Table<'lua>> {
    lua.named_registry_value(MARKER_KEY)
}
