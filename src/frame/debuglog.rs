//! Debug-log style stack frames.
//!
//! Unity prints the stack trace of a plain log call as one frame per line in colon form,
//! `Namespace.Type:Method(ParamType,ParamType)`. Only lines consisting of exactly one such
//! frame are recognized.

use std::sync::LazyLock;

use regex::Regex;

use crate::mapping::{MappingTable, OverloadMatch};

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
static DEBUG_LOG_FRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+):(\S+)(\([^)]*\))$").unwrap());

/// A decomposed debug-log frame. All fields borrow from the parsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugLogFrame<'a> {
    /// Declaring type, everything before the last colon that still leaves a method name.
    pub declaring_type: &'a str,
    /// Method name.
    pub method: &'a str,
    /// Parenthesized parameter list.
    pub parameters: &'a str,
}

impl<'a> DebugLogFrame<'a> {
    /// Decomposes `line`, returning `None` unless the whole line is a single frame.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = DEBUG_LOG_FRAME.captures(line)?;
        let group = |index: usize| caps.get(index).map_or("", |m| m.as_str());

        Some(DebugLogFrame {
            declaring_type: group(1),
            method: group(2),
            parameters: group(3),
        })
    }

    /// The obfuscated `DeclaringType:MethodName` lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.declaring_type, self.method)
    }

    /// Resolves the frame against `table`.
    ///
    /// The original colon-form name is emitted as stored. It is followed by the original
    /// parameter list on an exact match, or by the obfuscated one when only the fallback
    /// alternative applies. Returns `None` if the method key is unknown.
    #[must_use]
    pub fn resolve(&self, table: &MappingTable) -> Option<String> {
        let selected = table.select_overload(&self.key(), self.parameters)?;
        let overload = selected.overload();
        let parameters = match selected {
            OverloadMatch::Exact(_) => overload.old_parameters.as_str(),
            OverloadMatch::Fallback(_) => self.parameters,
        };
        Some(format!("{}{}", overload.old_declaring_and_method, parameters))
    }
}
