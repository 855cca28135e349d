//! Host-shipped helper modules on the search path

use super::harness::*;
use hexscript_runtime::RuntimeOptions;

#[test]
fn test_hextypes_helper() {
    let outcome = run_script(
        r#"
        local types = require("hextypes")
        types.struct("Header", {
            { "magic", types.u32 },
            { "version", types.u16 },
            { "flags", types.u8 },
        })
        "#,
        vec![],
    );
    assert_eq!(
        outcome.pattern_code(),
        vec!["struct Header {\n   u32 magic;\n   u16 version;\n   u8 flags;\n};\n"]
    );
}

#[test]
fn test_custom_lib_dir_takes_precedence() {
    let lib = tempfile::tempdir().unwrap();
    std::fs::write(
        lib.path().join("hextypes.lua"),
        r#"return { overridden = true }"#,
    )
    .unwrap();
    std::fs::create_dir(lib.path().join("vendor")).unwrap();
    std::fs::write(
        lib.path().join("vendor").join("init.lua"),
        r#"return { name = "vendor" }"#,
    )
    .unwrap();

    let options = RuntimeOptions {
        lib_dir: lib.path().to_path_buf(),
        ..RuntimeOptions::default()
    };
    let outcome = run_script_with(
        options,
        r#"
        assert(require("hextypes").overridden)
        assert(require("vendor").name == "vendor")
        "#,
        vec![],
    );
    outcome.report();
}

#[test]
fn test_home_dir_relocates_module_path() {
    let home = tempfile::tempdir().unwrap();
    let stdlib = home.path().join("lib").join("lua").join("5.4");
    std::fs::create_dir_all(&stdlib).unwrap();
    std::fs::write(stdlib.join("bundled.lua"), r#"return "from home""#).unwrap();

    let options = RuntimeOptions {
        home_dir: Some(home.path().to_path_buf()),
        ..test_options()
    };
    let outcome = run_script_with(
        options,
        r#"assert(require("bundled") == "from home")"#,
        vec![],
    );
    outcome.report();
}
