//! Running against a channel-backed event bus

use super::harness::*;
use crossbeam::channel;
use hexscript_runtime::Interpreter;
use hexscript_sdk::{HostEvent, MemoryProvider, ScriptContext};

#[test]
fn test_events_arrive_on_channel_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("loader.lua");
    std::fs::write(
        &script,
        r#"
        local hex = require("hex")
        hex.add_bookmark(0, 2, "first", "one")
        hex.add_struct(hex.HexType:extend("Empty", {}))
        hex.add_bookmark(2, 2, "second", "two")
        "#,
    )
    .unwrap();

    let (mut tx, rx) = channel::unbounded::<HostEvent>();
    let mut provider = MemoryProvider::new("channel", vec![0; 4]);
    let report = {
        let _serial = serial();
        let ctx = ScriptContext::new(&script, &mut provider, &mut tx);
        Interpreter::new(test_options()).run(ctx).unwrap()
    };
    drop(tx);

    let received: Vec<HostEvent> = rx.iter().collect();
    assert_eq!(report.events_posted, 3);
    assert_eq!(received.len(), 3);
    assert!(matches!(&received[0], HostEvent::AddBookmark(b) if b.name == "first"));
    assert_eq!(
        received[1],
        HostEvent::AppendPatternCode {
            code: "struct Empty {\n};\n".to_string()
        }
    );
    assert!(matches!(&received[2], HostEvent::AddBookmark(b) if b.name == "second"));
}

#[test]
fn test_disconnected_channel_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("loader.lua");
    std::fs::write(&script, r#"require("hex").add_bookmark(0, 1, "lost", "nobody listens")"#)
        .unwrap();

    let (mut tx, rx) = channel::unbounded::<HostEvent>();
    drop(rx);
    let mut provider = MemoryProvider::default();
    let _serial = serial();
    let ctx = ScriptContext::new(&script, &mut provider, &mut tx);
    let report = Interpreter::new(test_options()).run(ctx).unwrap();
    assert_eq!(report.events_posted, 1);
}
