// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # symresolve
//!
//! Resolves obfuscated .NET type and method names in runtime logs and stack traces back to
//! their original names, using the XML symbol mapping written by a name-obfuscation build
//! step.
//!
//! ## Features
//!
//! - **Two frame conventions** - exception traces (`at Type.Method (args) [0x0] in file:line`)
//!   and debug-log traces (`Type:Method(args)`)
//! - **Overload disambiguation** - obfuscated parameter lists select the matching original
//!   overload, with a best-effort fallback
//! - **Free-text type tokens** - `$A.$B/$C` tokens are resolved anywhere in a line
//! - **Atomic reloads** - a new mapping replaces the active one in a single swap; readers
//!   never observe a partial mapping
//! - **Parallel resolution** - large logs are resolved line by line on the rayon pool
//!
//! ## Quick Start
//!
//! ```rust
//! use symresolve::prelude::*;
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
//! assert_eq!(resolver.resolve("$A:$m()")?, "Game.Player:Update()\n");
//! # Ok::<(), symresolve::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`mapping`] - The mapping table and the XML loader that builds it
//! - [`frame`] - Line classifiers for the two stack-trace conventions
//! - [`tokens`] - Free-text type token substitution
//! - [`resolver`] - The resolution pipeline and the [`SymbolResolver`] engine
//! - [`hook`] - Adapter for resolving host log records
//! - [`config`] - Serializable resolver settings
//! - [`Error`] and [`Result`] - Error handling
//!
//! Loading a mapping is the only operation that can fail on input data. Lines and tokens
//! the mapping does not know pass through unchanged.

#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use symresolve::prelude::*;
///
/// let resolver = SymbolResolver::with_options(ResolveOptions {
///     filter_generated: true,
///     ..ResolveOptions::default()
/// });
/// assert!(matches!(resolver.resolve("$A"), Err(Error::NotLoaded)));
/// ```
pub mod prelude;

/// Serializable resolver settings.
pub mod config;

/// Stack-trace line classifiers.
pub mod frame;

/// Host log integration.
pub mod hook;

/// Symbol mapping table and loader.
pub mod mapping;

/// Resolution pipeline and resolver engine.
pub mod resolver;

/// Type token resolution.
pub mod tokens;

/// The result type used throughout symresolve.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;

pub use config::ResolverConfig;
pub use mapping::MappingTable;
pub use resolver::{resolve_text, ResolveOptions, SymbolResolver};
