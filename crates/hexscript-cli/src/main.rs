//! hexscript command-line tool
//!
//! Runs a loader script against a binary file and reports what the script
//! asked the host to do.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "hexscript")]
#[command(about = "Run hexscript loader scripts against binary files", long_about = None)]
#[command(version)]
struct Cli {
    /// When to use colored output
    #[arg(long, global = true, value_parser = ["auto", "always", "never"])]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a loader script
    Run {
        /// Loader script to run
        script: PathBuf,
        /// Binary file the script runs against
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Where to save the patched data
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory of helper modules, searched first by `require`
        #[arg(long)]
        lib_dir: Option<PathBuf>,
        /// Runtime options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut out = output::StyledOutput::new(output::resolve_color_choice(cli.color.as_deref()));

    let result = match cli.command {
        Commands::Run {
            script,
            file,
            output,
            lib_dir,
            config,
            json,
        } => commands::run::execute(
            commands::run::RunArgs {
                script,
                file,
                output,
                lib_dir,
                config,
                json,
            },
            &mut out,
        ),
    };

    if let Err(err) = result {
        out.stderr_error("error");
        out.stderr_plain(&format!(": {:#}\n", err));
        std::process::exit(1);
    }
}
