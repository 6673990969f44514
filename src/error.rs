use std::path::PathBuf;

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Failures only ever happen while a mapping document is loaded or a settings file is read.
/// Resolution itself never fails once a mapping is installed: lines that are not understood
/// are passed through unchanged, which is expected behavior and not an error.
///
/// # Error Categories
///
/// ## Mapping Load Errors
/// - [`Error::Malformed`] - The mapping document violates the expected schema
/// - [`Error::Xml`] - The mapping document is not well-formed XML
/// - [`Error::MappingFileNotFound`] - The mapping file path does not exist
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// ## Resolution Errors
/// - [`Error::NotLoaded`] - Resolution attempted before any mapping was loaded
/// - [`Error::LockError`] - The snapshot lock was poisoned by a panicking thread
///
/// ## Configuration Errors
/// - [`Error::Config`] - Settings could not be serialized or deserialized
///
/// # Examples
///
/// ```rust
/// use symresolve::{Error, SymbolResolver};
///
/// let resolver = SymbolResolver::new();
/// match resolver.load_str("<mapping><oops/></mapping>") {
///     Ok(()) => println!("loaded"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed mapping: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The mapping document is well-formed XML but does not follow the mapping schema.
    ///
    /// Raised when a top-level child is not an `assembly` element, when a `type` element
    /// lacks `fullName` or `newFullName`, or when a `method` element lacks one of its
    /// stack-trace signatures. The load is aborted and any previously installed mapping
    /// stays active.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// No mapping has been loaded yet.
    ///
    /// Resolution refuses to silently pass text through when it was never configured
    /// with a mapping, since that would hide a missing mapping file.
    #[error("No symbol mapping has been loaded")]
    NotLoaded,

    /// The mapping file does not exist.
    #[error("Mapping file does not exist: {}", .0.display())]
    MappingFileNotFound(PathBuf),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading a mapping or settings file.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The mapping document is not well-formed XML.
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    /// Settings could not be serialized or deserialized.
    #[error("{0}")]
    Config(#[from] serde_json::Error),

    /// Failed to lock target.
    ///
    /// This error occurs when the lock guarding the active mapping snapshot was
    /// poisoned by a thread that panicked while holding it.
    #[error("Failed to lock target")]
    LockError,
}
