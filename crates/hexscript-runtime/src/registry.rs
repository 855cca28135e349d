//! Registration of the `hex` module into a Lua state.
//!
//! Host functions borrow the run's `ScriptContext`, so they are created
//! inside an `mlua` scope and stop being callable once the scope ends. The
//! module table is pinned in the registry and handed out by a
//! `package.preload` loader, so `require("hex")` works from the script and
//! from any module it loads.

use std::cell::RefCell;

use hexscript_sdk::{DeclarationKind, ScriptContext};
use mlua::{ExternalResult, Lua, MultiValue, Scope, Table};

use crate::args::Args;
use crate::host_api;
use crate::prelude;
use crate::reflect::LuaReflector;
use crate::translate::{self, translate};

/// Name guests `require` the host module by
pub const MODULE_NAME: &str = "hex";

/// Registry slot holding the module table
const MODULE_KEY: &str = "hexscript.module";

/// Functions exported by the host module, in registration order
pub const HOST_FUNCTIONS: [&str; 5] = [
    "get_file_path",
    "patch",
    "add_bookmark",
    "add_struct",
    "add_union",
];

/// Build the `hex` module for one run and make it requireable.
pub fn register_host_module<'lua, 'scope, 'a>(
    lua: &'lua Lua,
    scope: &Scope<'lua, 'scope>,
    ctx: &'scope RefCell<ScriptContext<'a>>,
) -> mlua::Result<()>
where
    'lua: 'scope,
{
    if lua
        .named_registry_value::<Option<Table>>(MODULE_KEY)?
        .is_some()
    {
        return Err(mlua::Error::RuntimeError(format!(
            "host module '{}' is already registered",
            MODULE_NAME
        )));
    }

    let module = lua.create_table()?;

    module.set(
        "get_file_path",
        scope.create_function(move |_, ()| Ok(host_api::get_file_path(&ctx.borrow())))?,
    )?;

    module.set(
        "patch",
        scope.create_function(move |_, values: MultiValue| {
            let args = Args::new("patch", values);
            let address = args.u64(0, "address").into_lua_err()?;
            let data = args.bytes(1, "data").into_lua_err()?;
            host_api::patch(&mut ctx.borrow_mut(), address, data).into_lua_err()
        })?,
    )?;

    module.set(
        "add_bookmark",
        scope.create_function(move |_, values: MultiValue| {
            let args = Args::new("add_bookmark", values);
            let address = args.u64(0, "address").into_lua_err()?;
            let size = args.u64(1, "size").into_lua_err()?;
            let name = args.text(2, "name").into_lua_err()?;
            let comment = args.text(3, "comment").into_lua_err()?;
            host_api::add_bookmark(&mut ctx.borrow_mut(), address, size, name, comment)
                .into_lua_err()
        })?,
    )?;

    for kind in [DeclarationKind::Struct, DeclarationKind::Union] {
        let op = translate::op_name(kind);
        module.set(
            op,
            scope.create_function(move |lua, values: MultiValue| {
                let args = Args::new(op, values);
                let class = args.value(0, "class").into_lua_err()?;
                let reflector = LuaReflector::new(lua)?;
                let declaration = translate(&reflector, kind, &class).into_lua_err()?;
                host_api::add_declaration(&mut ctx.borrow_mut(), &declaration);
                Ok(())
            })?,
        )?;
    }

    module.set("HexType", prelude::marker(lua)?)?;
    lua.set_named_registry_value(MODULE_KEY, module)?;

    let loader = lua.create_function(|lua, _: MultiValue| {
        lua.named_registry_value::<Table>(MODULE_KEY)
    })?;
    let package: Table = lua.globals().get("package")?;
    let preload: Table = package.get("preload")?;
    preload.set(MODULE_NAME, loader)?;

    log::debug!(
        "registered host module '{}' ({})",
        MODULE_NAME,
        HOST_FUNCTIONS.join(", ")
    );
    Ok(())
}
