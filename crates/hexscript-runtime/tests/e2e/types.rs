//! add_struct and add_union as seen from a script

use super::harness::*;
use hexscript_sdk::HostError;

#[test]
fn test_add_struct_text() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        local T1 = hex.HexType:extend("T1")
        local T2 = hex.HexType:extend("T2")
        local C = hex.HexType:extend("C", { { "f1", T1 }, { "f2", T2 } })
        hex.add_struct(C)
        "#,
        vec![],
    );
    assert_eq!(outcome.report().events_posted, 1);
    assert_eq!(
        outcome.pattern_code(),
        vec!["struct C {\n   T1 f1;\n   T2 f2;\n};\n"]
    );
}

#[test]
fn test_add_union_text() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        local u32 = hex.HexType:extend("u32")
        local float = hex.HexType:extend("float")
        hex.add_union(hex.HexType:extend("Value", { { "raw", u32 }, { "real", float } }))
        "#,
        vec![],
    );
    assert_eq!(
        outcome.pattern_code(),
        vec!["union Value {\n   u32 raw;\n   float real;\n};\n"]
    );
}

#[test]
fn test_class_not_extending_marker() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        local Plain = setmetatable({ __name = "Plain", __annotations = {} }, {
            __call = function(c) return setmetatable({}, c) end,
        })
        hex.add_struct(Plain)
        "#,
        vec![],
    );
    assert!(matches!(outcome.host_error(), HostError::Type(_)));
    assert!(outcome.events.is_empty());
}

#[test]
fn test_impostor_marker_rejected() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        local FakeHexType = setmetatable({ __name = "HexType" }, {
            __call = function(c) return setmetatable({}, c) end,
        })
        FakeHexType.__index = FakeHexType
        local Sneaky = setmetatable({ __name = "Sneaky", __base = FakeHexType, __annotations = {} }, {
            __call = function(c) return setmetatable({}, c) end,
        })
        hex.add_union(Sneaky)
        "#,
        vec![],
    );
    assert!(matches!(outcome.host_error(), HostError::Type(_)));
    assert!(outcome.events.is_empty());
}

#[test]
fn test_bad_member_posts_no_partial_declaration() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        local u8 = hex.HexType:extend("u8")
        local NotHex = setmetatable({}, { __call = function() return {} end })
        hex.add_struct(hex.HexType:extend("Mixed", { { "ok", u8 }, { "bad", NotHex } }))
        "#,
        vec![],
    );
    match outcome.host_error() {
        HostError::Type(msg) => assert!(msg.contains("'bad'")),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(outcome.events.is_empty());
}

#[test]
fn test_failed_translation_then_retry_in_pcall() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        local u8 = hex.HexType:extend("u8")
        local ok = pcall(hex.add_struct, hex.HexType:extend("Broken", { { "x", 5 } }))
        assert(not ok)
        hex.add_struct(hex.HexType:extend("Fixed", { { "x", u8 } }))
        "#,
        vec![],
    );
    assert_eq!(
        outcome.pattern_code(),
        vec!["struct Fixed {\n   u8 x;\n};\n"]
    );
}

#[test]
fn test_missing_class_argument() {
    let outcome = run_script(r#"require("hex").add_struct()"#, vec![]);
    assert!(matches!(outcome.host_error(), HostError::Argument(_)));
}

#[test]
fn test_class_without_annotations() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        hex.add_struct(hex.HexType:extend("Bare"))
        "#,
        vec![],
    );
    assert!(matches!(outcome.host_error(), HostError::Argument(_)));
    assert!(outcome.events.is_empty());
}

#[test]
fn test_nested_struct_member() {
    let outcome = run_script(
        r#"
        local hex = require("hex")
        local u16 = hex.HexType:extend("u16")
        local Point = hex.HexType:extend("Point", { { "x", u16 }, { "y", u16 } })
        hex.add_struct(Point)
        hex.add_struct(hex.HexType:extend("Line", { { "from", Point }, { "to", Point } }))
        "#,
        vec![],
    );
    assert_eq!(
        outcome.pattern_code(),
        vec![
            "struct Point {\n   u16 x;\n   u16 y;\n};\n",
            "struct Line {\n   Point from;\n   Point to;\n};\n",
        ]
    );
}
