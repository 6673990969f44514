use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::Context;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{file_display_name, load_resolver},
    output::print_output,
};

#[derive(Debug, Serialize)]
struct ResolveOutput {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    lines_read: usize,
    lines_written: usize,
    filter_generated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read log: {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read log from stdin")?;
            Ok(text)
        }
    }
}

pub fn run(
    input: Option<&Path>,
    mapping: Option<&Path>,
    output: Option<&Path>,
    filter_generated: bool,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let (resolver, _) = load_resolver(mapping, opts)?;
    if filter_generated {
        resolver.set_filter_generated(true);
    }

    let text = read_input(input)?;
    let resolved = resolver.resolve(&text)?;

    let summary = ResolveOutput {
        input: input.map_or_else(|| "<stdin>".to_string(), file_display_name),
        output: output.map(file_display_name),
        lines_read: text.lines().count(),
        lines_written: resolved.lines().count(),
        filter_generated: resolver.filter_generated(),
        text: None,
    };

    match output {
        Some(path) => {
            fs::write(path, &resolved)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            print_output(&summary, opts, |s| {
                println!(
                    "Resolved {} lines from {} into {} ({} written)",
                    s.lines_read,
                    s.input,
                    s.output.as_deref().unwrap_or_default(),
                    s.lines_written
                );
            })
        }
        None if opts.json => {
            let summary = ResolveOutput {
                text: Some(resolved),
                ..summary
            };
            print_output(&summary, opts, |_| {})
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(resolved.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
