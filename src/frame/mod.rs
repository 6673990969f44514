//! Stack-trace line classifiers.
//!
//! Two independent matchers recognize a single line of stack-trace text, decompose it into
//! a typed frame and rebuild it with original names:
//!
//! - [`ExceptionFrame`] - `at Type.Method (params) [0x0] in file:line`, as printed for
//!   exceptions.
//! - [`DebugLogFrame`] - `Type:Method(params)` spanning the whole line, as printed below
//!   plain log messages.
//!
//! [`resolve_line`] tries the exception matcher first and only consults the debug-log
//! matcher when the first one left the line byte-for-byte unchanged.
//!
//! # Examples
//!
//! ```rust
//! use symresolve::frame::{classify, FrameKind};
//!
//! let frame = classify("$A:$m()").unwrap();
//! assert_eq!(frame.kind(), FrameKind::DebugLog);
//! assert_eq!(frame.key(), "$A:$m");
//! ```

mod debuglog;
mod exception;

pub use debuglog::DebugLogFrame;
pub use exception::ExceptionFrame;

use std::borrow::Cow;

use strum::{Display, EnumIter};

use crate::mapping::MappingTable;

/// The textual convention a frame was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum FrameKind {
    /// Exception-style frame, `at Type.Method (params) ... in file:line`.
    #[strum(serialize = "exception")]
    Exception,
    /// Debug-log style frame, `Type:Method(params)`.
    #[strum(serialize = "debug-log")]
    DebugLog,
}

/// A decomposed stack-trace line of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// See [`ExceptionFrame`].
    Exception(ExceptionFrame<'a>),
    /// See [`DebugLogFrame`].
    DebugLog(DebugLogFrame<'a>),
}

impl<'a> Frame<'a> {
    /// Parses `line` as a frame of the given kind.
    #[must_use]
    pub fn parse(kind: FrameKind, line: &'a str) -> Option<Self> {
        match kind {
            FrameKind::Exception => ExceptionFrame::parse(line).map(Frame::Exception),
            FrameKind::DebugLog => DebugLogFrame::parse(line).map(Frame::DebugLog),
        }
    }

    /// The convention this frame was written in.
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Exception(_) => FrameKind::Exception,
            Frame::DebugLog(_) => FrameKind::DebugLog,
        }
    }

    /// The obfuscated `DeclaringType:MethodName` lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Frame::Exception(frame) => frame.key(),
            Frame::DebugLog(frame) => frame.key(),
        }
    }

    /// The parenthesized parameter list as written in the line.
    #[must_use]
    pub fn parameters(&self) -> &'a str {
        match self {
            Frame::Exception(frame) => frame.parameters,
            Frame::DebugLog(frame) => frame.parameters,
        }
    }

    /// Rebuilds the line with original names, or `None` if the method is unknown.
    #[must_use]
    pub fn resolve(&self, table: &MappingTable) -> Option<String> {
        match self {
            Frame::Exception(frame) => frame.resolve(table),
            Frame::DebugLog(frame) => frame.resolve(table),
        }
    }
}

/// Decomposes `line` with the first matcher that recognizes it, exception style first.
#[must_use]
pub fn classify(line: &str) -> Option<Frame<'_>> {
    Frame::parse(FrameKind::Exception, line).or_else(|| Frame::parse(FrameKind::DebugLog, line))
}

/// Resolves the method frame in `line`, if any, and returns the rebuilt line.
///
/// Lines that neither matcher can change are returned borrowed and unchanged.
#[must_use]
pub fn resolve_line<'a>(line: &'a str, table: &MappingTable) -> Cow<'a, str> {
    for kind in [FrameKind::Exception, FrameKind::DebugLog] {
        let resolved = Frame::parse(kind, line).and_then(|frame| frame.resolve(table));
        if let Some(resolved) = resolved {
            if resolved != line {
                return Cow::Owned(resolved);
            }
        }
    }
    Cow::Borrowed(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const MAPPING: &str = r#"<mapping>
  <assembly name="Assembly-CSharp">
    <type fullName="Game.Player" newFullName="$A">
      <method oldStackTraceSignature="Game.Player:Update()" newStackTraceSignature="$A:$m()" />
      <method oldStackTraceSignature="Game.Player:Hit(int)" newStackTraceSignature="$A:$h(int)" />
      <method oldStackTraceSignature="Game.Player:Hit(Game.Weapon)" newStackTraceSignature="$A:$h($B)" />
    </type>
  </assembly>
</mapping>"#;

    fn table() -> MappingTable {
        MappingTable::from_xml(MAPPING).unwrap()
    }

    #[test]
    fn test_exception_exact_overload() {
        let table = table();
        assert_eq!(
            resolve_line("at $A.$h ($B) [0x00000] in <filename unknown>:0", &table),
            "at Game.Player.Hit (Game.Weapon) in <filename unknown>:0"
        );
        assert_eq!(
            resolve_line("at $A.$h (int) [0x00000] in <filename unknown>:0", &table),
            "at Game.Player.Hit (int) in <filename unknown>:0"
        );
    }

    #[test]
    fn test_exception_fallback_keeps_obfuscated_parameters() {
        let table = table();
        assert_eq!(
            resolve_line("at $A.$h ($C) [0x00000] in <filename unknown>:0", &table),
            "at Game.Player.Hit ($C) in <filename unknown>:0"
        );
    }

    #[test]
    fn test_debug_log_exact_and_fallback() {
        let table = table();
        assert_eq!(resolve_line("$A:$m()", &table), "Game.Player:Update()");
        assert_eq!(resolve_line("$A:$h($B)", &table), "Game.Player:Hit(Game.Weapon)");
        assert_eq!(resolve_line("$A:$h(float)", &table), "Game.Player:Hit(float)");
    }

    #[test]
    fn test_unknown_method_is_unchanged() {
        let table = table();
        let line = "at $A.$zz () [0x00000] in <filename unknown>:0";
        assert!(matches!(resolve_line(line, &table), Cow::Borrowed(_)));
        assert_eq!(resolve_line("$Z:$m()", &table), "$Z:$m()");
        assert_eq!(resolve_line("plain message", &table), "plain message");
    }

    #[test]
    fn test_classify_kinds() {
        assert_eq!(
            classify("at $A.$m () [0x00000] in <filename unknown>:0").map(|f| f.kind()),
            Some(FrameKind::Exception)
        );
        assert_eq!(classify("$A:$m()").map(|f| f.parameters()), Some("()"));
        assert!(classify("hello world").is_none());
    }

    #[test]
    fn test_frame_kind_names() {
        let names: Vec<String> = FrameKind::iter().map(|kind| kind.to_string()).collect();
        assert_eq!(names, vec!["exception", "debug-log"]);
    }
}
