//! `hexscript run` — run a loader script against a binary file.

use anyhow::Context;
use hexscript_runtime::{Interpreter, RuntimeOptions};
use hexscript_sdk::{HostEvent, MemoryProvider, ScriptContext};
use serde::Serialize;
use std::path::{Path, PathBuf};
use termcolor::Color;

use crate::output::StyledOutput;

pub struct RunArgs {
    pub script: PathBuf,
    pub file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub lib_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

/// Machine-readable run report printed by `--json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    script: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    patches_applied: usize,
    events: &'a [HostEvent],
}

pub fn execute(args: RunArgs, out: &mut StyledOutput) -> anyhow::Result<()> {
    let options = load_options(args.config.as_deref(), args.lib_dir)?;

    let mut provider = match &args.file {
        Some(path) => MemoryProvider::open(path)
            .with_context(|| format!("Cannot open data file {}", path.display()))?,
        None => MemoryProvider::default(),
    };

    if !args.json {
        out.info("Running ");
        out.plain(&format!("{}\n", args.script.display()));
    }

    let mut events: Vec<HostEvent> = Vec::new();
    let ctx = ScriptContext::new(&args.script, &mut provider, &mut events);
    let result = Interpreter::new(options).run(ctx);
    let error_kind = result
        .as_ref()
        .err()
        .and_then(|e| e.host_error())
        .map(|e| e.kind());

    if args.json {
        let report = JsonReport {
            script: args.script.display().to_string(),
            success: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
            error_kind,
            patches_applied: result.as_ref().map(|r| r.patches_applied).unwrap_or(0),
            events: &events,
        };
        out.plain(&serde_json::to_string_pretty(&report)?);
        out.newline();
    } else {
        print_events(out, &events);
    }
    out.flush();

    let report = result.with_context(|| match error_kind {
        Some(kind) => format!("Loader script {} failed with {}", args.script.display(), kind),
        None => format!("Loader script {} failed", args.script.display()),
    })?;

    if !args.json {
        out.success("Finished");
        out.plain(&format!(
            ": {} events, {} patches\n",
            report.events_posted, report.patches_applied
        ));
    }

    if let Some(output) = &args.output {
        provider
            .save(output)
            .with_context(|| format!("Cannot write {}", output.display()))?;
        log::info!("saved {} bytes to {}", provider.bytes().len(), output.display());
        if !args.json {
            out.success("Saved");
            out.plain(&format!(" {}\n", output.display()));
        }
    } else if provider.is_dirty() && !args.json {
        out.warning("warning");
        out.plain(": data was patched but no --output was given\n");
    }

    Ok(())
}

/// Options from the config file, if any, with CLI flags applied on top.
fn load_options(config: Option<&Path>, lib_dir: Option<PathBuf>) -> anyhow::Result<RuntimeOptions> {
    let mut options = match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => RuntimeOptions::default(),
    };
    if let Some(dir) = lib_dir {
        options.lib_dir = dir;
    }
    Ok(options)
}

fn print_events(out: &mut StyledOutput, events: &[HostEvent]) {
    for event in events {
        match event {
            HostEvent::AddBookmark(bookmark) => {
                out.badge("BOOKMARK", Color::Blue);
                out.plain(&format!(
                    " {} @ {:#x} (+{:#x})  ",
                    bookmark.name, bookmark.address, bookmark.size
                ));
                out.dim(&bookmark.comment);
                out.newline();
            }
            HostEvent::AppendPatternCode { code } => {
                out.badge("PATTERN", Color::Magenta);
                out.newline();
                out.plain(code);
            }
        }
    }
}
