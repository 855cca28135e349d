//! Host API surface: the operations behind the guest `hex` module.
//!
//! These are plain Rust functions over a `ScriptContext`; `registry` adapts
//! them to Lua calling conventions. Each either completes its side effect
//! fully or fails without touching the provider or posting an event.

use hexscript_sdk::{
    Bookmark, Declaration, HostError, HostEvent, HostResult, PatchRequest, ScriptContext,
};

/// `get_file_path()` — path of the script being run.
pub fn get_file_path(ctx: &ScriptContext<'_>) -> String {
    ctx.script_path().to_string_lossy().into_owned()
}

/// `patch(address, data)` — overwrite bytes in the opened data.
pub fn patch(ctx: &mut ScriptContext<'_>, address: u64, data: Option<Vec<u8>>) -> HostResult<()> {
    let bytes = match data {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => {
            return Err(HostError::argument(
                "patch",
                "invalid patch provided, data must be a non-empty byte string",
            ))
        }
    };
    let request = PatchRequest { address, bytes };

    let size = ctx.data_size();
    if request.address >= size {
        return Err(HostError::Range {
            address: request.address,
            size,
        });
    }

    ctx.write(request.address, &request.bytes);
    log::info!(
        "patched {} bytes at {:#x}..{:#x}",
        request.bytes.len(),
        request.address,
        request.end()
    );
    Ok(())
}

/// `add_bookmark(address, size, name, comment)` — post a bookmark event.
pub fn add_bookmark(
    ctx: &mut ScriptContext<'_>,
    address: u64,
    size: u64,
    name: Option<String>,
    comment: Option<String>,
) -> HostResult<()> {
    let name = name.ok_or_else(|| HostError::argument("add_bookmark", "missing name"))?;
    let comment = comment.ok_or_else(|| HostError::argument("add_bookmark", "missing comment"))?;

    log::info!("bookmark '{}' at {:#x} (+{:#x})", name, address, size);
    ctx.post(HostEvent::AddBookmark(Bookmark {
        address,
        size,
        name,
        comment,
    }));
    Ok(())
}

/// `add_struct(cls)` / `add_union(cls)` — post a translated declaration.
pub fn add_declaration(ctx: &mut ScriptContext<'_>, declaration: &Declaration) {
    log::info!(
        "appending {} {} to pattern source",
        declaration.kind,
        declaration.descriptor.type_name
    );
    ctx.post(HostEvent::AppendPatternCode {
        code: declaration.to_source(),
    });
}
