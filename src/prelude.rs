//! # symresolve Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! symresolve library. Import it to get quick access to the resolver, its settings and
//! the mapping types.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all symresolve operations
pub use crate::Error;

/// The result type used throughout symresolve
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Engine owning the active mapping snapshot, and the pure pipeline behind it
pub use crate::resolver::{resolve_text, ResolveOptions, SymbolResolver, GENERATED_METHOD_MARKER};

/// Serializable resolver settings
pub use crate::config::ResolverConfig;

// ================================================================================================
// Mapping Table
// ================================================================================================

/// Mapping table and overload alternatives
pub use crate::mapping::{MappingTable, MethodOverload, MethodSignature, OverloadMatch};

// ================================================================================================
// Line Classification
// ================================================================================================

/// Typed decompositions of stack-trace lines
pub use crate::frame::{classify, DebugLogFrame, ExceptionFrame, Frame, FrameKind};

/// Free-text type token substitution
pub use crate::tokens::resolve_type_tokens;

// ================================================================================================
// Host Integration
// ================================================================================================

/// Log record interception
pub use crate::hook::{LogHandler, LogLevel, LogRecord, ResolvingHandler};
