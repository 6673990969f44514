mod app;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // symresolve info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("symresolve", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Resolve {
            input,
            mapping,
            output,
            filter_generated,
        } => commands::resolve::run(
            input.as_deref(),
            mapping.as_deref(),
            output.as_deref(),
            *filter_generated,
            &cli.global,
        ),
        Command::Info { mapping } => commands::info::run(mapping.as_deref(), &cli.global),
        Command::Types { mapping, filter } => {
            commands::types::run(mapping.as_deref(), filter.as_deref(), &cli.global)
        }
        Command::Lookup { mapping, name } => {
            commands::lookup::run(mapping.as_deref(), name, &cli.global)
        }
    }
}
