//! Exception-style stack frames.
//!
//! Recognizes frames the way the Mono runtime prints them for exceptions:
//!
//! ```text
//!   at Namespace.Type[T].Method[U] (System.Int32 a) [0x0001c] in /path/File.cs:42
//! ```
//!
//! The optional IL offset bracket is matched but not kept; reconstruction joins the
//! parameter list and the `in ...` location with a single space.

use std::sync::LazyLock;

use regex::Regex;

use crate::mapping::{MappingTable, OverloadMatch};

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
static EXCEPTION_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    // 1 prefix, 2 declaring type, 3 type generics, 4 method, 5 method generics,
    // 6 separator, 7 parameters, 8 location
    Regex::new(
        r"^(\s*at\s+)([^\[\]\s]*[^.\[\]\s])(\[[^\[\].\s]+\])?\.(\S[^\[\].\s]*)(\[[^\[\].\s]+\])?(\s+)(\(.*\))(?:\s+\[\S+\])?\s+(in\s.*)$",
    )
    .unwrap()
});

/// A decomposed exception-style frame. All fields borrow from the parsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionFrame<'a> {
    /// Leading indentation and `at `.
    pub prefix: &'a str,
    /// Declaring type without its generic argument bracket.
    pub declaring_type: &'a str,
    /// Generic argument bracket of the declaring type, e.g. `[T]`, or empty.
    pub type_generics: &'a str,
    /// Method name without its generic argument bracket.
    pub method: &'a str,
    /// Generic argument bracket of the method, or empty.
    pub method_generics: &'a str,
    /// Whitespace between the method and its parameter list.
    pub separator: &'a str,
    /// Parenthesized parameter list.
    pub parameters: &'a str,
    /// Trailing `in <file>:<line>` location.
    pub location: &'a str,
}

impl<'a> ExceptionFrame<'a> {
    /// Decomposes `line`, returning `None` if it is not an exception-style frame.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = EXCEPTION_FRAME.captures(line)?;
        let group = |index: usize| caps.get(index).map_or("", |m| m.as_str());

        Some(ExceptionFrame {
            prefix: group(1),
            declaring_type: group(2),
            type_generics: group(3),
            method: group(4),
            method_generics: group(5),
            separator: group(6),
            parameters: group(7),
            location: group(8),
        })
    }

    /// The obfuscated `DeclaringType:MethodName` lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.declaring_type, self.method)
    }

    /// Rebuilds the frame with the given names and parameter list, keeping the prefix,
    /// generic brackets, separator and location of this frame.
    #[must_use]
    pub fn render(&self, declaring_type: &str, method: &str, parameters: &str) -> String {
        format!(
            "{}{}{}.{}{}{}{} {}",
            self.prefix,
            declaring_type,
            self.type_generics,
            method,
            self.method_generics,
            self.separator,
            parameters,
            self.location
        )
    }

    /// Resolves the frame against `table`.
    ///
    /// An exact parameter match substitutes the original parameter list; the fallback
    /// alternative only contributes its names and the obfuscated parameters stay. Returns
    /// `None` if the method key is unknown.
    #[must_use]
    pub fn resolve(&self, table: &MappingTable) -> Option<String> {
        let selected = table.select_overload(&self.key(), self.parameters)?;
        let overload = selected.overload();
        let (declaring_type, method) = overload.old_declaring_type_and_method();
        let parameters = match selected {
            OverloadMatch::Exact(_) => overload.old_parameters.as_str(),
            OverloadMatch::Fallback(_) => self.parameters,
        };
        Some(self.render(declaring_type, method, parameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_frame() {
        let frame = ExceptionFrame::parse("at $A.$m () [0x00000] in <filename unknown>:0").unwrap();
        assert_eq!(frame.prefix, "at ");
        assert_eq!(frame.declaring_type, "$A");
        assert_eq!(frame.type_generics, "");
        assert_eq!(frame.method, "$m");
        assert_eq!(frame.separator, " ");
        assert_eq!(frame.parameters, "()");
        assert_eq!(frame.location, "in <filename unknown>:0");
        assert_eq!(frame.key(), "$A:$m");
    }

    #[test]
    fn test_parse_nested_type_and_generics() {
        let frame = ExceptionFrame::parse(
            "  at $N.$A[T].$m[U] (System.Int32 a, $B b) [0x0001c] in /src/Game/Player.cs:42",
        )
        .unwrap();
        assert_eq!(frame.prefix, "  at ");
        assert_eq!(frame.declaring_type, "$N.$A");
        assert_eq!(frame.type_generics, "[T]");
        assert_eq!(frame.method, "$m");
        assert_eq!(frame.method_generics, "[U]");
        assert_eq!(frame.parameters, "(System.Int32 a, $B b)");
        assert_eq!(frame.location, "in /src/Game/Player.cs:42");
    }

    #[test]
    fn test_parse_constructor() {
        let frame = ExceptionFrame::parse("at $A..ctor () [0x00000] in <filename unknown>:0").unwrap();
        assert_eq!(frame.declaring_type, "$A");
        assert_eq!(frame.method, ".ctor");
        assert_eq!(frame.key(), "$A:.ctor");
    }

    #[test]
    fn test_parse_without_il_offset() {
        let frame = ExceptionFrame::parse("at $A.$m (int) in <filename unknown>:0").unwrap();
        assert_eq!(frame.parameters, "(int)");
        assert_eq!(frame.location, "in <filename unknown>:0");
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(ExceptionFrame::parse("$A:$m()").is_none());
        assert!(ExceptionFrame::parse("at $A.$m ()").is_none());
        assert!(ExceptionFrame::parse("NullReferenceException: Object reference not set").is_none());
        assert!(ExceptionFrame::parse("").is_none());
    }

    #[test]
    fn test_render_keeps_frame_layout() {
        let frame = ExceptionFrame::parse(
            "  at $A[T].$m[U]  ($B) [0x00000] in <filename unknown>:0",
        )
        .unwrap();
        assert_eq!(
            frame.render("Game.Box", "Get", "(Game.Item)"),
            "  at Game.Box[T].Get[U]  (Game.Item) in <filename unknown>:0"
        );
    }
}
