//! Type token resolution.
//!
//! Obfuscated type names are built from `$`-prefixed segments joined by `.` (namespaces)
//! or `/` (nested types), e.g. `$A.$B/$C`. They show up anywhere in log text: in generic
//! arguments, in parameter lists, in exception messages. This module finds every such
//! token and substitutes the original name when the mapping knows the token verbatim.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

use crate::mapping::MappingTable;

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
static TYPE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\w$]+(?:[./]\$[\w$]+)*").unwrap());

/// Replaces every known obfuscated type token in `text` with its original name.
///
/// Unknown tokens are left untouched. Text without any token is returned borrowed.
///
/// ```rust
/// use symresolve::{mapping::MappingTable, tokens::resolve_type_tokens};
///
/// let table = MappingTable::from_xml(
///     r#"<m><assembly><type fullName="Game.Player" newFullName="$A"/></assembly></m>"#,
/// )?;
/// assert_eq!(
///     resolve_type_tokens("List`1[$A] and $Q", &table),
///     "List`1[Game.Player] and $Q"
/// );
/// # Ok::<(), symresolve::Error>(())
/// ```
#[must_use]
pub fn resolve_type_tokens<'a>(text: &'a str, table: &MappingTable) -> Cow<'a, str> {
    TYPE_TOKEN.replace_all(text, |caps: &Captures<'_>| {
        let token = &caps[0];
        table.original_type_name(token).unwrap_or(token).to_string()
    })
}

/// Iterates the obfuscated type tokens found in `text`, known or not.
pub fn type_tokens(text: &str) -> impl Iterator<Item = &str> {
    TYPE_TOKEN.find_iter(text).map(|token| token.as_str())
}
