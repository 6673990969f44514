//! Host log integration.
//!
//! Hosts that can intercept their log pipeline hand each record to a [`LogHandler`].
//! Wrapping the host's own handler in a [`ResolvingHandler`] resolves the message and the
//! stack trace of every record before forwarding it. How records are intercepted is up to
//! the host; this module only provides the capability "given a raw record, produce the
//! resolved record".
//!
//! # Examples
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use symresolve::{
//!     hook::{LogHandler, LogLevel, LogRecord, ResolvingHandler},
//!     SymbolResolver,
//! };
//!
//! #[derive(Default)]
//! struct Collect(Mutex<Vec<LogRecord>>);
//!
//! impl LogHandler for Collect {
//!     fn handle(&self, record: LogRecord) {
//!         self.0.lock().unwrap().push(record);
//!     }
//! }
//!
//! let resolver = Arc::new(SymbolResolver::new());
//! resolver.load_str(r#"<m><assembly><type fullName="Game.Player" newFullName="$A"/></assembly></m>"#)?;
//!
//! let handler = ResolvingHandler::new(Arc::clone(&resolver), Collect::default());
//! handler.install();
//! handler.handle(LogRecord::new(LogLevel::Error, "bad state in $A", ""));
//!
//! let records = handler.inner().0.lock().unwrap();
//! assert_eq!(records[0].message, "bad state in Game.Player\n");
//! # Ok::<(), symresolve::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use strum::{Display, EnumIter, EnumString};

use crate::{Error, ResolverConfig, SymbolResolver};

/// Severity of a host log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum LogLevel {
    /// An error message.
    Error,
    /// A failed assertion.
    Assert,
    /// A warning.
    Warning,
    /// A regular message.
    Log,
    /// An exception report.
    Exception,
}

/// One log record as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity.
    pub level: LogLevel,
    /// The log message.
    pub message: String,
    /// The stack trace attached to the message, possibly empty.
    pub stack_trace: String,
}

impl LogRecord {
    /// Creates a record.
    pub fn new(level: LogLevel, message: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        LogRecord {
            level,
            message: message.into(),
            stack_trace: stack_trace.into(),
        }
    }
}

/// Receiver of host log records.
pub trait LogHandler: Send + Sync {
    /// Consumes one record.
    fn handle(&self, record: LogRecord);
}

/// A [`LogHandler`] that resolves records before handing them to an inner handler.
///
/// Interception starts uninstalled; while uninstalled, or while the resolver has no
/// mapping, records are forwarded unchanged.
pub struct ResolvingHandler<H> {
    resolver: Arc<SymbolResolver>,
    inner: H,
    installed: AtomicBool,
    marker: Option<String>,
}

impl<H: LogHandler> ResolvingHandler<H> {
    /// Wraps `inner`, resolving with `resolver`.
    pub fn new(resolver: Arc<SymbolResolver>, inner: H) -> Self {
        ResolvingHandler {
            resolver,
            inner,
            installed: AtomicBool::new(false),
            marker: None,
        }
    }

    /// Wraps `inner` and installs interception right away when `config.hook_logs` is set.
    pub fn from_config(resolver: Arc<SymbolResolver>, inner: H, config: &ResolverConfig) -> Self {
        let handler = Self::new(resolver, inner);
        if config.hook_logs {
            handler.install();
        }
        handler
    }

    /// Prefixes every resolved message with `marker`, e.g. `[DeObfuz]`.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Starts resolving forwarded records.
    pub fn install(&self) {
        self.installed.store(true, Ordering::Release);
        log::info!("log records are resolved before forwarding");
    }

    /// Stops resolving; records are forwarded unchanged.
    pub fn uninstall(&self) {
        self.installed.store(false, Ordering::Release);
        log::info!("log records are forwarded unresolved");
    }

    /// Whether records are currently resolved.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    /// The wrapped handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    fn resolve(&self, record: LogRecord) -> LogRecord {
        match self.resolver.resolve_record(&record) {
            Ok(mut resolved) => {
                if let Some(marker) = &self.marker {
                    resolved.message.insert_str(0, marker);
                }
                resolved
            }
            Err(Error::NotLoaded) => {
                log::warn!("no symbol mapping loaded, forwarding log record unresolved");
                record
            }
            Err(err) => {
                log::warn!("failed to resolve log record: {}", err);
                record
            }
        }
    }
}

impl<H: LogHandler> LogHandler for ResolvingHandler<H> {
    fn handle(&self, record: LogRecord) {
        let record = if self.is_installed() {
            self.resolve(record)
        } else {
            record
        };
        self.inner.handle(record);
    }
}
