//! Resolution pipeline and the resolver engine.
//!
//! [`resolve_text`] is the pure pipeline: split the text into lines, rebuild each method
//! frame with [`crate::frame::resolve_line`], substitute the remaining type tokens with
//! [`crate::tokens::resolve_type_tokens`], optionally drop lines of obfuscator-generated
//! methods, and join the survivors with a newline after every line.
//!
//! [`SymbolResolver`] owns the active [`MappingTable`] snapshot. Loading parses a complete
//! table first and then swaps the shared pointer, so concurrent callers observe either the
//! old or the new mapping in full. Resolution only clones the pointer and never holds the
//! lock while working.
//!
//! # Examples
//!
//! ```rust
//! use symresolve::SymbolResolver;
//!
//! let resolver = SymbolResolver::new();
//! resolver.load_str(r#"
//! <mapping>
//!   <assembly name="Assembly-CSharp">
//!     <type fullName="Game.Player" newFullName="$A">
//!       <method oldStackTraceSignature="Game.Player:Update()" newStackTraceSignature="$A:$m()"/>
//!     </type>
//!   </assembly>
//! </mapping>"#)?;
//!
//! let resolved = resolver.resolve("at $A.$m () [0x00000] in <filename unknown>:0")?;
//! assert_eq!(resolved, "at Game.Player.Update () in <filename unknown>:0\n");
//! # Ok::<(), symresolve::Error>(())
//! ```

use std::{
    fs,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock,
    },
};

use rayon::prelude::*;

use crate::{
    config::{ResolverConfig, DEFAULT_PARALLEL_THRESHOLD},
    frame,
    hook::LogRecord,
    mapping::MappingTable,
    tokens, Error, Result,
};

/// Lines whose resolved text starts with this marker belong to methods synthesized by the
/// obfuscator.
pub const GENERATED_METHOD_MARKER: &str = "$Obfuz$";

/// Per-call options of the resolution pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Drop lines whose resolved text starts with [`GENERATED_METHOD_MARKER`].
    pub filter_generated: bool,
    /// Minimum line count for resolving lines on the rayon thread pool.
    pub parallel_threshold: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            filter_generated: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Resolves a single line: method frame first, then every type token in the result.
#[must_use]
pub fn resolve_line(line: &str, table: &MappingTable) -> String {
    let framed = frame::resolve_line(line, table);
    tokens::resolve_type_tokens(&framed, table).into_owned()
}

/// Resolves a multi-line text block against `table`.
///
/// `\r\n` and `\n` both end a line. Every surviving line is followed by `\n`, so the result
/// of a non-empty input always ends with a newline and resolving the output again leaves it
/// unchanged. Each call builds its own output buffer.
#[must_use]
pub fn resolve_text(table: &MappingTable, text: &str, options: &ResolveOptions) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let resolved: Vec<String> = if lines.len() >= options.parallel_threshold {
        lines
            .par_iter()
            .map(|line| resolve_line(line, table))
            .collect()
    } else {
        lines.iter().map(|line| resolve_line(line, table)).collect()
    };

    let mut output = String::with_capacity(text.len() + 1);
    for line in resolved
        .iter()
        .filter(|line| !(options.filter_generated && line.starts_with(GENERATED_METHOD_MARKER)))
    {
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// Engine holding the active mapping snapshot.
///
/// Constructed and owned by its caller; share it behind an [`Arc`] to resolve from several
/// threads. All methods take `&self`.
#[derive(Debug)]
pub struct SymbolResolver {
    snapshot: RwLock<Option<Arc<MappingTable>>>,
    filter_generated: AtomicBool,
    parallel_threshold: usize,
}

impl Default for SymbolResolver {
    fn default() -> Self {
        Self::with_options(ResolveOptions::default())
    }
}

impl SymbolResolver {
    /// Creates a resolver without a mapping and with generated-line filtering disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with the given pipeline options.
    #[must_use]
    pub fn with_options(options: ResolveOptions) -> Self {
        SymbolResolver {
            snapshot: RwLock::new(None),
            filter_generated: AtomicBool::new(options.filter_generated),
            parallel_threshold: options.parallel_threshold,
        }
    }

    /// Creates a resolver from settings, loading the configured mapping file if any.
    ///
    /// # Errors
    /// Returns the load error of the configured mapping file.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        let resolver = Self::with_options(ResolveOptions {
            filter_generated: config.filter_generated,
            parallel_threshold: config.parallel_threshold,
        });
        if let Some(path) = &config.mapping_file {
            resolver.load_file(path)?;
        }
        Ok(resolver)
    }

    /// Parses a mapping document and makes it the active snapshot.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] or [`Error::Xml`] if the document cannot be loaded; the
    /// previously active snapshot, if any, stays in place.
    pub fn load_str(&self, document: &str) -> Result<()> {
        let table = MappingTable::from_xml(document)?;
        self.install(table)
    }

    /// Reads and loads a mapping document from disk.
    ///
    /// # Errors
    /// Returns [`Error::MappingFileNotFound`] if `path` does not exist, [`Error::FileError`]
    /// if it cannot be read, and the errors of [`SymbolResolver::load_str`] otherwise.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MappingFileNotFound(path.to_path_buf()));
        }
        let document = fs::read_to_string(path)?;
        self.load_str(&document)?;
        log::debug!("loaded symbol mapping from {}", path.display());
        Ok(())
    }

    /// Makes an already built table the active snapshot.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the snapshot lock is poisoned.
    pub fn install(&self, table: MappingTable) -> Result<()> {
        let table = Arc::new(table);
        log::info!(
            "installing symbol mapping snapshot: {} types, {} methods",
            table.type_count(),
            table.method_count()
        );
        *write_lock!(self.snapshot)? = Some(table);
        Ok(())
    }

    /// Returns `true` once a mapping has been loaded.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the snapshot lock is poisoned.
    pub fn is_loaded(&self) -> Result<bool> {
        Ok(read_lock!(self.snapshot)?.is_some())
    }

    /// Returns the active snapshot.
    ///
    /// # Errors
    /// Returns [`Error::NotLoaded`] if no mapping was loaded yet.
    pub fn snapshot(&self) -> Result<Arc<MappingTable>> {
        read_lock!(self.snapshot)?.clone().ok_or(Error::NotLoaded)
    }

    /// Enables or disables dropping lines of obfuscator-generated methods.
    pub fn set_filter_generated(&self, enabled: bool) {
        self.filter_generated.store(enabled, Ordering::Relaxed);
    }

    /// Whether lines of obfuscator-generated methods are dropped.
    #[must_use]
    pub fn filter_generated(&self) -> bool {
        self.filter_generated.load(Ordering::Relaxed)
    }

    /// Current pipeline options.
    #[must_use]
    pub fn options(&self) -> ResolveOptions {
        ResolveOptions {
            filter_generated: self.filter_generated(),
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// Resolves a text block against the active snapshot.
    ///
    /// # Errors
    /// Returns [`Error::NotLoaded`] if no mapping was loaded yet.
    pub fn resolve(&self, text: &str) -> Result<String> {
        let table = self.snapshot()?;
        Ok(resolve_text(&table, text, &self.options()))
    }

    /// Resolves the message and the stack trace of a log record.
    ///
    /// Both are resolved against the same snapshot.
    ///
    /// # Errors
    /// Returns [`Error::NotLoaded`] if no mapping was loaded yet.
    pub fn resolve_record(&self, record: &LogRecord) -> Result<LogRecord> {
        let table = self.snapshot()?;
        let options = self.options();
        Ok(LogRecord {
            level: record.level,
            message: resolve_text(&table, &record.message, &options),
            stack_trace: resolve_text(&table, &record.stack_trace, &options),
        })
    }
}
