use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// symresolve - resolve obfuscated .NET names in logs and stack traces
#[derive(Debug, Parser)]
#[command(name = "symresolve", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Resolver settings file (JSON) supplying defaults for the mapping file and filtering.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a log file or stack trace and write the deobfuscated text.
    Resolve {
        /// Log file to resolve. Reads stdin when omitted.
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Symbol mapping document.
        #[arg(short, long, value_name = "MAPPING")]
        mapping: Option<PathBuf>,

        /// Write the result to a file instead of stdout.
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Drop lines of methods generated by the obfuscator.
        #[arg(long)]
        filter_generated: bool,
    },

    /// Display mapping overview: type, method and overload counts.
    Info {
        /// Symbol mapping document.
        #[arg(short, long, value_name = "MAPPING")]
        mapping: Option<PathBuf>,
    },

    /// List type mappings.
    Types {
        /// Symbol mapping document.
        #[arg(short, long, value_name = "MAPPING")]
        mapping: Option<PathBuf>,

        /// Only show types whose original or obfuscated name contains this text.
        #[arg(short, long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Resolve a single obfuscated type or method name (e.g. `$A`, `$A.$m`, `$A:$m`).
    Lookup {
        /// Symbol mapping document.
        #[arg(short, long, value_name = "MAPPING")]
        mapping: Option<PathBuf>,

        /// The obfuscated name.
        #[arg(value_name = "NAME")]
        name: String,
    },
}
