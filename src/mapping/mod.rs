//! In-memory symbol mapping table.
//!
//! A [`MappingTable`] is built once from a mapping document by the [`loader`] and is
//! read-only afterwards. It holds two independent lookups:
//!
//! - **Type names**: obfuscated fully-qualified type name to original type name.
//! - **Method signatures**: obfuscated `DeclaringType:MethodName` key to the ordered list
//!   of [`MethodOverload`] alternatives the obfuscated name stands for.
//!
//! # Overload Selection
//!
//! Several original overloads can share one obfuscated method name. They only differ by
//! their obfuscated parameter list, so [`MappingTable::select_overload`] first looks for an
//! alternative whose obfuscated parameter text matches exactly, and otherwise falls back to
//! the first alternative that was defined in the document.
//!
//! # Examples
//!
//! ```rust
//! use symresolve::mapping::{MappingTable, OverloadMatch};
//!
//! let table = MappingTable::from_xml(r#"
//! <mapping>
//!   <assembly name="Game">
//!     <type fullName="Game.Player" newFullName="$A">
//!       <method oldStackTraceSignature="Game.Player:Move(int)" newStackTraceSignature="$A:$m(int)"/>
//!       <method oldStackTraceSignature="Game.Player:Move(float)" newStackTraceSignature="$A:$m(float)"/>
//!     </type>
//!   </assembly>
//! </mapping>"#)?;
//!
//! assert_eq!(table.original_type_name("$A"), Some("Game.Player"));
//! match table.select_overload("$A:$m", "(float)") {
//!     Some(OverloadMatch::Exact(overload)) => assert_eq!(overload.old_parameters, "(float)"),
//!     other => panic!("unexpected match {:?}", other),
//! }
//! # Ok::<(), symresolve::Error>(())
//! ```

pub mod loader;
pub mod name;

use std::{borrow::Cow, collections::HashMap};

use crate::Result;

/// One original method an obfuscated method name can stand for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOverload {
    /// Original `DeclaringType:MethodName`, in colon form.
    pub old_declaring_and_method: String,
    /// Original parenthesized parameter list, e.g. `(int,string)`; empty when absent.
    pub old_parameters: String,
    /// Obfuscated parenthesized parameter list, used to tell overloads apart.
    pub new_parameters: String,
}

impl MethodOverload {
    /// Splits the original name into `(declaring_type, method_name)` at the last colon.
    #[must_use]
    pub fn old_declaring_type_and_method(&self) -> (&str, &str) {
        name::split_colon_form(&self.old_declaring_and_method)
    }
}

/// All overload alternatives recorded for a single obfuscated method key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// The obfuscated `DeclaringType:MethodName` this signature is keyed by.
    pub new_declaring_and_method: String,
    /// Alternatives in document order; the first one is the fallback.
    pub alternatives: Vec<MethodOverload>,
}

impl MethodSignature {
    fn new(new_declaring_and_method: &str) -> Self {
        MethodSignature {
            new_declaring_and_method: new_declaring_and_method.to_string(),
            alternatives: Vec::new(),
        }
    }

    /// Returns the alternative whose obfuscated parameter list equals `new_parameters`.
    #[must_use]
    pub fn exact(&self, new_parameters: &str) -> Option<&MethodOverload> {
        self.alternatives
            .iter()
            .find(|alternative| alternative.new_parameters == new_parameters)
    }

    /// Returns the first inserted alternative.
    #[must_use]
    pub fn fallback(&self) -> Option<&MethodOverload> {
        self.alternatives.first()
    }

    /// Picks the alternative for `new_parameters`, falling back to the first one.
    #[must_use]
    pub fn select(&self, new_parameters: &str) -> Option<OverloadMatch<'_>> {
        if let Some(overload) = self.exact(new_parameters) {
            return Some(OverloadMatch::Exact(overload));
        }
        self.fallback().map(OverloadMatch::Fallback)
    }
}

/// Outcome of an overload lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadMatch<'a> {
    /// An alternative whose obfuscated parameter list matched exactly.
    Exact(&'a MethodOverload),
    /// No exact match; the first inserted alternative is used for its names only and
    /// callers keep the parameter text they were given.
    Fallback(&'a MethodOverload),
}

impl<'a> OverloadMatch<'a> {
    /// The selected alternative, regardless of how it was selected.
    #[must_use]
    pub fn overload(&self) -> &'a MethodOverload {
        match self {
            OverloadMatch::Exact(overload) | OverloadMatch::Fallback(overload) => overload,
        }
    }

    /// Returns `true` if the parameter list matched exactly.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        matches!(self, OverloadMatch::Exact(_))
    }
}

/// Read-only lookup tables built from one mapping document.
#[derive(Debug, Default, Clone)]
pub struct MappingTable {
    types: HashMap<String, String>,
    methods: HashMap<String, MethodSignature>,
}

impl MappingTable {
    /// Parses a mapping document.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the document violates the mapping schema, or
    /// [`crate::Error::Xml`] if it is not well-formed XML.
    pub fn from_xml(document: &str) -> Result<Self> {
        loader::load(document)
    }

    /// Records a type pair. A repeated obfuscated name replaces the earlier entry.
    pub(crate) fn insert_type(&mut self, old_full_name: &str, new_full_name: &str) {
        if let Some(previous) = self
            .types
            .insert(new_full_name.to_string(), old_full_name.to_string())
        {
            log::debug!(
                "type '{}' remapped from '{}' to '{}'",
                new_full_name,
                previous,
                old_full_name
            );
        }
    }

    /// Appends an overload alternative under its obfuscated `DeclaringType:MethodName` key.
    pub(crate) fn insert_method(&mut self, new_declaring_and_method: &str, overload: MethodOverload) {
        self.methods
            .entry(new_declaring_and_method.to_string())
            .or_insert_with(|| MethodSignature::new(new_declaring_and_method))
            .alternatives
            .push(overload);
    }

    /// Returns the original name of an obfuscated fully-qualified type name.
    #[must_use]
    pub fn original_type_name(&self, obfuscated: &str) -> Option<&str> {
        self.types.get(obfuscated).map(String::as_str)
    }

    /// Returns the method signature recorded for an obfuscated colon-form key.
    #[must_use]
    pub fn method(&self, new_declaring_and_method: &str) -> Option<&MethodSignature> {
        self.methods.get(new_declaring_and_method)
    }

    /// Looks up `key` and selects the overload matching `new_parameters`.
    ///
    /// Returns `None` only when the key is unknown.
    #[must_use]
    pub fn select_overload(&self, key: &str, new_parameters: &str) -> Option<OverloadMatch<'_>> {
        self.method(key)?.select(new_parameters)
    }

    /// Resolves an obfuscated method name given in dot form (`$A.$m`, `$A..ctor`) or in
    /// colon form (`$A:$m`), returning the original name in dot form.
    ///
    /// The first defined overload is used since no parameter list is available.
    #[must_use]
    pub fn resolve_method_name(&self, method_name: &str) -> Option<String> {
        let key = if method_name.contains(':') {
            Cow::Borrowed(method_name)
        } else {
            name::to_colon_form(method_name)
        };
        let overload = self.method(&key)?.fallback()?;
        Some(name::to_dot_form(&overload.old_declaring_and_method).into_owned())
    }

    /// Number of distinct obfuscated type names.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of distinct obfuscated method keys.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Number of obfuscated method keys carrying more than one alternative.
    #[must_use]
    pub fn overloaded_method_count(&self) -> usize {
        self.methods
            .values()
            .filter(|signature| signature.alternatives.len() > 1)
            .count()
    }

    /// Iterates `(obfuscated, original)` type name pairs in no particular order.
    pub fn types(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types
            .iter()
            .map(|(new_name, old_name)| (new_name.as_str(), old_name.as_str()))
    }

    /// Iterates all method signatures in no particular order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.methods.values()
    }

    /// Returns `true` if neither types nor methods were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overload(old: &str, old_params: &str, new_params: &str) -> MethodOverload {
        MethodOverload {
            old_declaring_and_method: old.to_string(),
            old_parameters: old_params.to_string(),
            new_parameters: new_params.to_string(),
        }
    }

    fn overloaded_table() -> MappingTable {
        let mut table = MappingTable::default();
        table.insert_type("Game.Player", "$A");
        table.insert_method("$A:$m", overload("Game.Player:Move", "(int)", "(int)"));
        table.insert_method("$A:$m", overload("Game.Player:Move", "(Game.Vec)", "($B)"));
        table.insert_method("$A:.ctor", overload("Game.Player:.ctor", "()", "()"));
        table
    }

    #[test]
    fn test_type_last_write_wins() {
        let mut table = MappingTable::default();
        table.insert_type("Game.Old", "$A");
        table.insert_type("Game.New", "$A");
        assert_eq!(table.type_count(), 1);
        assert_eq!(table.original_type_name("$A"), Some("Game.New"));
    }

    #[test]
    fn test_select_exact_overload() {
        let table = overloaded_table();
        let selected = table.select_overload("$A:$m", "($B)").unwrap();
        assert!(selected.is_exact());
        assert_eq!(selected.overload().old_parameters, "(Game.Vec)");

        let selected = table.select_overload("$A:$m", "(int)").unwrap();
        assert!(selected.is_exact());
        assert_eq!(selected.overload().old_parameters, "(int)");
    }

    #[test]
    fn test_select_fallback_is_first_inserted() {
        let table = overloaded_table();
        let selected = table.select_overload("$A:$m", "(bool)").unwrap();
        assert!(!selected.is_exact());
        assert_eq!(selected.overload().old_parameters, "(int)");
    }

    #[test]
    fn test_select_unknown_key() {
        let table = overloaded_table();
        assert!(table.select_overload("$A:$z", "()").is_none());
    }

    #[test]
    fn test_resolve_method_name_forms() {
        let table = overloaded_table();
        assert_eq!(
            table.resolve_method_name("$A.$m").as_deref(),
            Some("Game.Player.Move")
        );
        assert_eq!(
            table.resolve_method_name("$A:$m").as_deref(),
            Some("Game.Player.Move")
        );
        assert_eq!(
            table.resolve_method_name("$A..ctor").as_deref(),
            Some("Game.Player..ctor")
        );
        assert_eq!(table.resolve_method_name("$Z.$m"), None);
    }

    #[test]
    fn test_counts() {
        let table = overloaded_table();
        assert_eq!(table.type_count(), 1);
        assert_eq!(table.method_count(), 2);
        assert_eq!(table.overloaded_method_count(), 1);
        assert!(!table.is_empty());
        assert!(MappingTable::default().is_empty());
    }
}
